//! Installer invocation with fixed silent-install flags.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Inno Setup flags that run the Git for Windows installer without prompts.
pub const SILENT_ARGS: &[&str] = &[
    "/VERYSILENT",
    "/NORESTART",
    "/NOCANCEL",
    "/SP-",
    "/CLOSEAPPLICATIONS",
    "/RESTARTAPPLICATIONS",
    "/COMPONENTS=icons,ext\\reg\\shellhere,assoc,assoc_sh",
];

pub fn default_args() -> Vec<String> {
    SILENT_ARGS.iter().map(|s| s.to_string()).collect()
}

/// Human-readable command line, for dry runs and logs.
pub fn command_line(exe: &Path, args: &[String]) -> String {
    let mut line = format!("\"{}\"", exe.display());
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Starts an installer and waits for it.
pub trait Launcher {
    /// Run `exe` with `args`; returns the exit code (`None` if terminated by a signal).
    fn launch(&self, exe: &Path, args: &[String]) -> Result<Option<i32>>;
}

/// Runs the installer as a child process of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, exe: &Path, args: &[String]) -> Result<Option<i32>> {
        tracing::info!(command = %command_line(exe, args), "launching installer");
        let status = Command::new(exe)
            .args(args)
            .status()
            .with_context(|| format!("failed to start installer {}", exe.display()))?;
        Ok(status.code())
    }
}

/// Launch the installer and report its exit code. A non-zero code is logged,
/// not treated as a failure.
pub fn run_installer(launcher: &dyn Launcher, exe: &Path, args: &[String]) -> Result<Option<i32>> {
    let code = launcher.launch(exe, args)?;
    match code {
        Some(0) => tracing::info!("installer finished"),
        Some(c) => tracing::warn!(exit_code = c, "installer exited with non-zero code"),
        None => tracing::warn!("installer terminated without an exit code"),
    }
    Ok(code)
}
