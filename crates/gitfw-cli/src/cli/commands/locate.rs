//! `gitfw locate` – print the latest release and its installer URL.

use anyhow::Result;
use gitfw_core::arch;
use gitfw_core::config::GitfwConfig;
use gitfw_core::release;

use crate::cli::ProxyArgs;

pub fn run_locate(cfg: &GitfwConfig, requested: &str, proxy: &ProxyArgs) -> Result<()> {
    let arch = arch::resolve(requested)?;
    let mut net = proxy.network_options();
    net.timeout = cfg.timeout();
    let info = release::locate_latest(cfg, &net, arch)?;
    println!("tag:          {}", info.tag);
    println!("version:      {}", info.version);
    println!("architecture: {}", arch);
    println!("url:          {}", info.download_url);
    Ok(())
}
