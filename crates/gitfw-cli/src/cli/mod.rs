//! CLI for gitfw.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gitfw_core::config;
use gitfw_core::net::NetworkOptions;
use std::path::PathBuf;

use commands::{run_checksum, run_install, run_locate};

/// Top-level CLI for gitfw.
#[derive(Debug, Parser)]
#[command(name = "gitfw")]
#[command(about = "gitfw: download and silently install Git for Windows", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Proxy settings shared by commands that touch the network.
#[derive(Debug, Clone, Default, Args)]
pub struct ProxyArgs {
    /// Proxy URL for all HTTP requests (e.g. http://proxy.corp:8080).
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Authenticate to the proxy as the current user.
    #[arg(long)]
    pub proxy_use_default_credentials: bool,
}

impl ProxyArgs {
    pub fn network_options(&self) -> NetworkOptions {
        NetworkOptions {
            proxy: self.proxy.clone(),
            proxy_default_credentials: self.proxy_use_default_credentials,
            ..NetworkOptions::default()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the latest Git for Windows installer and run it silently.
    Install {
        /// Installer architecture: auto, x86 (32-bit) or x64 (64-bit).
        #[arg(long, default_value = "auto", value_name = "ARCH")]
        arch: String,

        /// Show what would be downloaded and run, without doing it.
        #[arg(long)]
        dry_run: bool,

        /// Install from this URL or local path instead of the latest release.
        #[arg(long, value_name = "URL|PATH")]
        source: Option<String>,

        #[command(flatten)]
        proxy: ProxyArgs,
    },

    /// Print the latest release and its installer URL.
    Locate {
        /// Installer architecture: auto, x86 (32-bit) or x64 (64-bit).
        #[arg(long, default_value = "auto", value_name = "ARCH")]
        arch: String,

        #[command(flatten)]
        proxy: ProxyArgs,
    },

    /// Compute SHA-256 of a file (e.g. a downloaded installer).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Install {
                arch,
                dry_run,
                source,
                proxy,
            } => run_install(&cfg, &arch, dry_run, source, &proxy)?,
            CliCommand::Locate { arch, proxy } => run_locate(&cfg, &arch, &proxy)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
