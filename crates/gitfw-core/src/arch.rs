//! Architecture resolution: map a requested or detected CPU architecture to
//! the installer naming token ("32-bit" / "64-bit").

use crate::error::InstallError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bit32,
    Bit64,
}

impl Architecture {
    /// Token used in Git for Windows installer file names.
    pub fn token(&self) -> &'static str {
        match self {
            Architecture::Bit32 => "32-bit",
            Architecture::Bit64 => "64-bit",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resolve `requested` against the process environment.
pub fn resolve(requested: &str) -> Result<Architecture, InstallError> {
    resolve_with(requested, |name| std::env::var(name).ok())
}

/// Resolve `requested`, reading environment variables through `env` so tests can
/// supply their own.
pub fn resolve_with<F>(requested: &str, env: F) -> Result<Architecture, InstallError>
where
    F: Fn(&str) -> Option<String>,
{
    let normalized = requested.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" | "auto" => detect(&env)
            .ok_or_else(|| InstallError::UnsupportedArchitecture(requested.to_string())),
        other => from_alias(other)
            .ok_or_else(|| InstallError::UnsupportedArchitecture(requested.to_string())),
    }
}

fn from_alias(value: &str) -> Option<Architecture> {
    match value {
        "x86" | "i386" | "i686" | "32" | "32-bit" | "32bit" | "win32" => Some(Architecture::Bit32),
        "x64" | "amd64" | "x86_64" | "64" | "64-bit" | "64bit" | "win64" => {
            Some(Architecture::Bit64)
        }
        _ => None,
    }
}

fn detect<F>(env: &F) -> Option<Architecture>
where
    F: Fn(&str) -> Option<String>,
{
    // Set only for a 32-bit process on 64-bit Windows.
    if env("PROCESSOR_ARCHITEW6432").is_some_and(|v| !v.trim().is_empty()) {
        return Some(Architecture::Bit64);
    }
    if let Some(value) = env("PROCESSOR_ARCHITECTURE") {
        let arch = match value.trim().to_ascii_uppercase().as_str() {
            "AMD64" | "ARM64" | "IA64" => Some(Architecture::Bit64),
            "X86" => Some(Architecture::Bit32),
            _ => None,
        };
        tracing::debug!(processor_architecture = %value, ?arch, "detected from environment");
        return arch;
    }
    let arch = match std::env::consts::ARCH {
        "x86_64" | "aarch64" => Some(Architecture::Bit64),
        "x86" => Some(Architecture::Bit32),
        _ => None,
    };
    tracing::debug!(target_arch = std::env::consts::ARCH, ?arch, "detected from build target");
    arch
}
