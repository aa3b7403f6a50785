//! Staging area: a private temp directory holding the downloaded installer.
//!
//! The installer is written to `<name>.part` first and renamed to its final
//! name once complete. Cleanup removes the whole directory; dropping an
//! un-cleaned staging area removes it too.

mod name;

pub use name::{file_name_from_url, installer_file_name, sanitize_file_name, DEFAULT_INSTALLER_NAME};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

#[derive(Debug)]
pub struct Staging {
    dir: tempfile::TempDir,
    installer_path: PathBuf,
}

impl Staging {
    /// Create a fresh `gitfw-*` directory under `root` for an installer named `file_name`.
    pub fn create(root: &Path, file_name: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("gitfw-")
            .tempdir_in(root)
            .with_context(|| format!("failed to create staging directory in {}", root.display()))?;
        let installer_path = dir.path().join(file_name);
        tracing::debug!(path = %installer_path.display(), "staging area created");
        Ok(Staging {
            dir,
            installer_path,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Final path of the staged installer.
    pub fn installer_path(&self) -> &Path {
        &self.installer_path
    }

    /// In-progress path (`<installer>.part`).
    pub fn part_path(&self) -> PathBuf {
        let mut name = self.installer_path.as_os_str().to_owned();
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    /// Rename the `.part` file to the final installer path.
    pub fn finalize(&self) -> Result<()> {
        let part = self.part_path();
        std::fs::rename(&part, &self.installer_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                part.display(),
                self.installer_path.display()
            )
        })
    }

    /// Delete the staging directory and everything in it. Failures are logged, not returned.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "staging area removed"),
            Err(e) => tracing::warn!(path = %path.display(), "could not remove staging area: {}", e),
        }
    }
}
