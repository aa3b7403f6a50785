//! Free-space check for the staging directory.

use std::path::{Component, Path, PathBuf, Prefix};

/// Outcome of comparing free space against the required minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceCheck {
    Sufficient { available: u64 },
    Insufficient { available: u64, required: u64 },
    /// No disk could be matched to the path; the run proceeds.
    Unknown,
}

impl SpaceCheck {
    pub fn is_insufficient(&self) -> bool {
        matches!(self, SpaceCheck::Insufficient { .. })
    }
}

/// Compare `available` bytes against `required`.
pub fn evaluate(available: Option<u64>, required: u64) -> SpaceCheck {
    match available {
        None => SpaceCheck::Unknown,
        Some(available) if available < required => SpaceCheck::Insufficient {
            available,
            required,
        },
        Some(available) => SpaceCheck::Sufficient { available },
    }
}

/// Rewrite a verbatim disk prefix (`\\?\C:\...`, what `canonicalize` yields on
/// Windows) to the plain `C:\...` form disks report their mount points in.
pub fn strip_verbatim(path: &Path) -> PathBuf {
    let mut components = path.components();
    if let Some(Component::Prefix(prefix)) = components.next() {
        if let Prefix::VerbatimDisk(letter) = prefix.kind() {
            let mut out = PathBuf::from(format!("{}:\\", letter as char));
            for c in components.filter(|c| !matches!(c, Component::RootDir)) {
                out.push(c);
            }
            return out;
        }
    }
    path.to_path_buf()
}

/// Index of the mount point that is the longest prefix of `path`.
pub fn best_mount<'a, I>(path: &Path, mounts: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    let path = strip_verbatim(path);
    mounts
        .into_iter()
        .enumerate()
        .filter(|(_, m)| path.starts_with(strip_verbatim(m)))
        .max_by_key(|(_, m)| m.as_os_str().len())
        .map(|(i, _)| i)
}

/// Free bytes on the disk holding `path` (longest matching mount point).
pub fn available_space(path: &Path) -> Option<u64> {
    let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let list = disks.list();
    best_mount(&path, list.iter().map(|d| d.mount_point())).map(|i| list[i].available_space())
}

/// Check that `path` has at least `required` bytes free.
pub fn check(path: &Path, required: u64) -> SpaceCheck {
    let result = evaluate(available_space(path), required);
    match result {
        SpaceCheck::Sufficient { available } => {
            tracing::debug!(path = %path.display(), available, required, "free space ok");
        }
        SpaceCheck::Insufficient { available, required } => {
            tracing::warn!(path = %path.display(), available, required, "not enough free space");
        }
        SpaceCheck::Unknown => {
            tracing::warn!(path = %path.display(), "could not determine free space; continuing");
        }
    }
    result
}
