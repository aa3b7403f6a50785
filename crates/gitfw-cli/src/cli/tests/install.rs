//! Tests for the install subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_install_defaults() {
    match parse(&["gitfw", "install"]) {
        CliCommand::Install {
            arch,
            dry_run,
            source,
            proxy,
        } => {
            assert_eq!(arch, "auto");
            assert!(!dry_run);
            assert!(source.is_none());
            assert!(proxy.proxy.is_none());
            assert!(!proxy.proxy_use_default_credentials);
        }
        _ => panic!("expected Install"),
    }
}

#[test]
fn cli_parse_install_all_flags() {
    match parse(&[
        "gitfw",
        "install",
        "--arch",
        "x86",
        "--dry-run",
        "--proxy",
        "http://proxy.corp:8080",
        "--proxy-use-default-credentials",
        "--source",
        "\\\\share\\Git-2.47.1-32-bit.exe",
    ]) {
        CliCommand::Install {
            arch,
            dry_run,
            source,
            proxy,
        } => {
            assert_eq!(arch, "x86");
            assert!(dry_run);
            assert_eq!(source.as_deref(), Some("\\\\share\\Git-2.47.1-32-bit.exe"));
            assert_eq!(proxy.proxy.as_deref(), Some("http://proxy.corp:8080"));
            assert!(proxy.proxy_use_default_credentials);
            let net = proxy.network_options();
            assert!(net.proxy_default_credentials);
        }
        _ => panic!("expected Install with flags"),
    }
}

#[test]
fn cli_parse_install_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["gitfw", "install", "--quiet"]).is_err());
}
