//! Download attempt error type.

use std::fmt;

/// Error returned by a single download attempt (curl failure, HTTP error, or storage failure).
/// Kept separate from anyhow so the retry loop can tell storage failures apart.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, proxy, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the staged file failed (e.g. disk full, permission denied). Not retried.
    Storage(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl FetchError {
    /// Everything but a local write failure may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Curl(e) => !e.is_write_error(),
            FetchError::Http(_) => true,
            FetchError::Storage(_) => false,
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}
