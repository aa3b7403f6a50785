//! End-to-end install flow: resolve architecture, check free space, locate the
//! release, fetch, launch, clean up.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::arch::{self, Architecture};
use crate::config::GitfwConfig;
use crate::disk::{self, SpaceCheck};
use crate::fetch::{self, InstallerSource};
use crate::installer::{self, Launcher};
use crate::net::NetworkOptions;
use crate::release::{self, ReleaseInfo};
use crate::staging::Staging;

/// What the caller asked for.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Architecture selector (`auto`, `x86`, `x64`, ...).
    pub arch: String,
    pub dry_run: bool,
    /// Explicit installer URL or path; skips the release lookup.
    pub source: Option<String>,
    pub network: NetworkOptions,
    /// Directory the staging area is created in (default: system temp dir).
    pub staging_root: Option<PathBuf>,
}

impl Default for InstallRequest {
    fn default() -> Self {
        Self {
            arch: "auto".to_string(),
            dry_run: false,
            source: None,
            network: NetworkOptions::default(),
            staging_root: None,
        }
    }
}

/// Everything decided before any byte is downloaded.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    pub arch: Architecture,
    /// `None` when an explicit source was given.
    pub release: Option<ReleaseInfo>,
    pub source: InstallerSource,
    pub staging_root: PathBuf,
    pub installer_args: Vec<String>,
}

impl InstallPlan {
    /// Command line the installer would be started with. The staging
    /// directory is only created at download time, so its random part is
    /// shown as `gitfw-*`.
    pub fn command_line(&self) -> String {
        let exe = self
            .staging_root
            .join("gitfw-*")
            .join(self.source.file_name());
        installer::command_line(&exe, &self.installer_args)
    }
}

#[derive(Debug, Clone)]
pub enum InstallOutcome {
    Installed {
        plan: InstallPlan,
        sha256: String,
        exit_code: Option<i32>,
    },
    DryRun(InstallPlan),
    /// Benign early exit: the staging directory is too full.
    InsufficientSpace { available: u64, required: u64 },
}

/// Run the whole flow. Unsupported architecture and download failure are
/// halting errors; insufficient space and dry runs return normally.
pub fn run(
    request: &InstallRequest,
    cfg: &GitfwConfig,
    launcher: &dyn Launcher,
) -> Result<InstallOutcome> {
    let arch = arch::resolve(&request.arch)?;
    tracing::info!(requested = %request.arch, resolved = %arch, "architecture resolved");

    let staging_root = request
        .staging_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    if let SpaceCheck::Insufficient { available, required } =
        disk::check(&staging_root, cfg.min_free_space_bytes())
    {
        return Ok(InstallOutcome::InsufficientSpace {
            available,
            required,
        });
    }

    let mut net = request.network.clone();
    net.timeout = cfg.timeout();

    let plan = build_plan(request, cfg, &net, arch, staging_root)?;
    if request.dry_run {
        tracing::info!(source = %plan.source, "dry run, nothing downloaded");
        return Ok(InstallOutcome::DryRun(plan));
    }

    let staging = Staging::create(&plan.staging_root, &plan.source.file_name())?;
    let fetched = match fetch::fetch_installer(&plan.source, &staging, &net, &cfg.retry_policy()) {
        Ok(f) => f,
        Err(e) => {
            staging.cleanup();
            return Err(e.into());
        }
    };

    let launched = installer::run_installer(launcher, &fetched.path, &plan.installer_args);
    staging.cleanup();
    let exit_code = launched?;

    Ok(InstallOutcome::Installed {
        plan,
        sha256: fetched.sha256,
        exit_code,
    })
}

fn build_plan(
    request: &InstallRequest,
    cfg: &GitfwConfig,
    net: &NetworkOptions,
    arch: Architecture,
    staging_root: PathBuf,
) -> Result<InstallPlan> {
    let (release, source) = match request.source.as_deref() {
        Some(explicit) => (None, InstallerSource::parse(explicit)),
        None => {
            let info = release::locate_latest(cfg, net, arch)
                .context("could not determine the latest Git for Windows release")?;
            let source = InstallerSource::Remote(info.download_url.clone());
            (Some(info), source)
        }
    };
    let installer_args = cfg
        .installer_args
        .clone()
        .unwrap_or_else(installer::default_args);
    Ok(InstallPlan {
        arch,
        release,
        source,
        staging_root,
        installer_args,
    })
}
