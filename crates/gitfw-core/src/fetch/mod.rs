//! Fetcher: bring the installer into the staging area, either by HTTP GET with
//! retry or by copying a local file.
//!
//! Any failure becomes [`InstallError::DownloadFailed`] naming the source.

mod http;
mod local;

pub use http::download_to;
pub use local::copy_to;

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

use crate::checksum;
use crate::error::InstallError;
use crate::net::NetworkOptions;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::staging::{self, Staging};

/// Where the installer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallerSource {
    Remote(String),
    Local(PathBuf),
}

impl InstallerSource {
    /// `http://` / `https://` → Remote; `file://` URLs and plain paths → Local.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return InstallerSource::Remote(trimmed.to_string());
        }
        if lower.starts_with("file:") {
            if let Ok(path) = url::Url::parse(trimmed).map_err(|_| ()).and_then(|u| u.to_file_path()) {
                return InstallerSource::Local(path);
            }
        }
        InstallerSource::Local(PathBuf::from(trimmed))
    }

    /// File name the staged installer gets.
    pub fn file_name(&self) -> String {
        match self {
            InstallerSource::Remote(url) => {
                staging::installer_file_name(staging::file_name_from_url(url).as_deref())
            }
            InstallerSource::Local(path) => {
                staging::installer_file_name(path.file_name().and_then(|n| n.to_str()))
            }
        }
    }
}

impl fmt::Display for InstallerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallerSource::Remote(url) => f.write_str(url),
            InstallerSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchedInstaller {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// Fetch `source` into `staging`. Remote sources are retried per `policy`.
pub fn fetch_installer(
    source: &InstallerSource,
    staging: &Staging,
    net: &NetworkOptions,
    policy: &RetryPolicy,
) -> Result<FetchedInstaller, InstallError> {
    fetch_inner(source, staging, net, policy).map_err(|source_err| {
        tracing::error!(source = %source, "download failed: {:#}", source_err);
        InstallError::DownloadFailed {
            url: source.to_string(),
            source: source_err.into(),
        }
    })
}

fn fetch_inner(
    source: &InstallerSource,
    staging: &Staging,
    net: &NetworkOptions,
    policy: &RetryPolicy,
) -> Result<FetchedInstaller> {
    let part = staging.part_path();
    let bytes = match source {
        InstallerSource::Remote(url) => run_with_retry(policy, |attempt| {
            tracing::info!(url = %url, attempt, "downloading installer");
            download_to(url, &part, net)
        })?,
        InstallerSource::Local(path) => {
            tracing::info!(path = %path.display(), "copying installer");
            copy_to(path, &part)?
        }
    };
    staging.finalize()?;

    let path = staging.installer_path().to_path_buf();
    let sha256 = checksum::sha256_path(&path)?;
    tracing::info!(path = %path.display(), bytes, sha256 = %sha256, "installer staged");
    Ok(FetchedInstaller {
        path,
        bytes,
        sha256,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_remote_sources() {
        assert_eq!(
            InstallerSource::parse("https://example.com/Git.exe"),
            InstallerSource::Remote("https://example.com/Git.exe".to_string())
        );
        assert!(matches!(
            InstallerSource::parse("HTTP://example.com/Git.exe"),
            InstallerSource::Remote(_)
        ));
    }

    #[test]
    fn parse_local_sources() {
        assert_eq!(
            InstallerSource::parse("C:\\installers\\Git.exe"),
            InstallerSource::Local(PathBuf::from("C:\\installers\\Git.exe"))
        );
        #[cfg(unix)]
        assert_eq!(
            InstallerSource::parse("file:///srv/share/Git-2.47.1-64-bit.exe"),
            InstallerSource::Local(PathBuf::from("/srv/share/Git-2.47.1-64-bit.exe"))
        );
    }

    #[test]
    fn file_name_follows_source() {
        let remote = InstallerSource::parse(
            "https://github.com/git-for-windows/git/releases/download/v2.47.1.windows.1/Git-2.47.1-64-bit.exe",
        );
        assert_eq!(remote.file_name(), "Git-2.47.1-64-bit.exe");
        let bare = InstallerSource::parse("https://example.com/");
        assert_eq!(bare.file_name(), staging::DEFAULT_INSTALLER_NAME);
    }

    #[test]
    fn local_fetch_stages_and_hashes() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("Git-local.exe");
        std::fs::write(&src, b"hello\n").unwrap();
        let source = InstallerSource::Local(src);
        let staging = Staging::create(root.path(), &source.file_name()).unwrap();
        let fetched = fetch_installer(
            &source,
            &staging,
            &NetworkOptions::default(),
            &RetryPolicy::default(),
        )
        .unwrap();
        assert_eq!(fetched.bytes, 6);
        assert_eq!(fetched.path, staging.installer_path());
        assert_eq!(
            fetched.sha256,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn missing_local_source_is_a_download_failure() {
        let root = tempfile::tempdir().unwrap();
        let source = InstallerSource::Local(root.path().join("missing.exe"));
        let staging = Staging::create(root.path(), "missing.exe").unwrap();
        let err = fetch_installer(
            &source,
            &staging,
            &NetworkOptions::default(),
            &RetryPolicy::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.exe"));
        assert!(matches!(err, InstallError::DownloadFailed { .. }));
    }
}
