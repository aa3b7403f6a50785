use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Redirect endpoint whose final target names the current release tag.
pub const DEFAULT_RELEASE_PAGE_URL: &str =
    "https://github.com/git-for-windows/git/releases/latest";

/// Asset URL template; `{tag}`, `{version}` and `{arch}` are substituted.
pub const DEFAULT_DOWNLOAD_URL_TEMPLATE: &str =
    "https://github.com/git-for-windows/git/releases/download/{tag}/Git-{version}-{arch}.exe";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of download attempts (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts.
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/gitfw/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitfwConfig {
    /// "Latest release" page; its redirect target carries the version tag.
    pub release_page_url: String,
    /// Template for the installer asset URL.
    pub download_url_template: String,
    /// Overall timeout for a single download attempt, in seconds.
    pub timeout_secs: u64,
    /// Minimum free space (MiB) required in the staging directory.
    pub min_free_space_mb: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional replacement for the built-in silent-install flags.
    #[serde(default)]
    pub installer_args: Option<Vec<String>>,
}

impl Default for GitfwConfig {
    fn default() -> Self {
        Self {
            release_page_url: DEFAULT_RELEASE_PAGE_URL.to_string(),
            download_url_template: DEFAULT_DOWNLOAD_URL_TEMPLATE.to_string(),
            timeout_secs: 1800,
            min_free_space_mb: 500,
            retry: None,
            installer_args: None,
        }
    }
}

impl GitfwConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_free_space_bytes(&self) -> u64 {
        self.min_free_space_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(unix)]
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gitfw")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// No XDG config dir outside unix; [`load_or_init`] then uses the defaults.
#[cfg(not(unix))]
pub fn config_path() -> Result<PathBuf> {
    anyhow::bail!("no XDG config directory on this platform")
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<GitfwConfig> {
    if !path.exists() {
        let default_cfg = GitfwConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: GitfwConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir. Hosts without XDG directories
/// (Windows) get the built-in defaults.
pub fn load_or_init() -> Result<GitfwConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::debug!("no config directory ({:#}), using defaults", e);
            Ok(GitfwConfig::default())
        }
    }
}
