//! Logging init: append to a file under the XDG state dir on unix hosts,
//! stderr everywhere else.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,gitfw=debug,gitfw_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `~/.local/state/gitfw/gitfw.log`.
/// Returns Err when the log file cannot be opened so the caller can fall back
/// to [`init_logging_stderr`].
#[cfg(unix)]
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gitfw")?;
    // place_state_file creates the prefixed state directory if needed.
    let log_file_path = xdg_dirs.place_state_file("gitfw.log")?;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init: {}", e))?;

    tracing::info!("gitfw logging initialized at {}", log_file_path.display());

    Ok(())
}

/// No XDG state dir outside unix; callers fall back to stderr.
#[cfg(not(unix))]
pub fn init_logging() -> Result<()> {
    anyhow::bail!("no XDG state directory on this platform")
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[cfg(not(unix))]
    #[test]
    fn file_logging_unavailable_without_xdg() {
        assert!(super::init_logging().is_err());
    }
}
