//! `gitfw install` – locate, download and silently run the installer.

use anyhow::Result;
use gitfw_core::config::GitfwConfig;
use gitfw_core::flow::{self, InstallOutcome, InstallRequest};
use gitfw_core::installer::SystemLauncher;

use crate::cli::ProxyArgs;

const MIB: f64 = 1_048_576.0;

pub fn run_install(
    cfg: &GitfwConfig,
    arch: &str,
    dry_run: bool,
    source: Option<String>,
    proxy: &ProxyArgs,
) -> Result<()> {
    let request = InstallRequest {
        arch: arch.to_string(),
        dry_run,
        source,
        network: proxy.network_options(),
        staging_root: None,
    };

    match flow::run(&request, cfg, &SystemLauncher)? {
        InstallOutcome::InsufficientSpace {
            available,
            required,
        } => {
            println!(
                "Not enough free space in {}: {:.0} MiB available, {:.0} MiB required. Nothing installed.",
                std::env::temp_dir().display(),
                available as f64 / MIB,
                required as f64 / MIB
            );
        }
        InstallOutcome::DryRun(plan) => {
            println!("Dry run, nothing will be downloaded or installed.");
            println!("  architecture: {}", plan.arch);
            if let Some(release) = &plan.release {
                println!("  version:      {} ({})", release.version, release.tag);
            }
            println!("  source:       {}", plan.source);
            println!("  staging root: {}", plan.staging_root.display());
            println!("  command:      {}", plan.command_line());
        }
        InstallOutcome::Installed {
            plan,
            sha256,
            exit_code,
        } => {
            let version = plan
                .release
                .as_ref()
                .map(|r| r.version.as_str())
                .unwrap_or("(from explicit source)");
            println!("Installed Git for Windows {} ({})", version, plan.arch);
            println!("  installer sha256: {}", sha256);
            match exit_code {
                Some(0) => {}
                Some(code) => println!("  installer exit code: {}", code),
                None => println!("  installer terminated without an exit code"),
            }
        }
    }
    Ok(())
}
