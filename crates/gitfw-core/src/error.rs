//! Halting errors surfaced to the user.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    /// Requested architecture matches no known alias and could not be detected.
    #[error("unsupported architecture '{0}' (expected auto, x86 or x64)")]
    UnsupportedArchitecture(String),

    /// Redirect target did not end in a `v<version>` release tag.
    #[error("could not extract a release tag from {0}")]
    ReleaseTag(String),

    /// Fetch failed after all attempts; the cause is kept as the source.
    #[error("failed to download Git for Windows installer from {url}")]
    DownloadFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
