//! Release locator: follow the "latest release" redirect and derive the
//! installer download URL.
//!
//! Uses the curl crate (libcurl). One request is made; its effective URL after
//! redirects names the release tag.

mod parse;

pub use parse::{derive_download_url, parse_release_tag, ReleaseTag};

use anyhow::{Context, Result};

use crate::arch::Architecture;
use crate::config::GitfwConfig;
use crate::net::NetworkOptions;

/// Latest release and the installer URL for one architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag: String,
    pub version: String,
    pub download_url: String,
}

/// Follows `page_url` and returns the final URL after redirects.
///
/// Sends HEAD first; servers that refuse HEAD (405/501) get a GET whose body is
/// discarded.
pub fn resolve_redirect(page_url: &str, net: &NetworkOptions) -> Result<String> {
    match follow(page_url, net, true)? {
        (code, _) if code == 405 || code == 501 => {
            tracing::debug!(code, "HEAD refused, retrying redirect probe with GET");
        }
        (code, effective) => return check_status(page_url, code, effective),
    }
    let (code, effective) = follow(page_url, net, false)?;
    check_status(page_url, code, effective)
}

fn check_status(page_url: &str, code: u32, effective: String) -> Result<String> {
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", page_url, code);
    }
    Ok(effective)
}

fn follow(page_url: &str, net: &NetworkOptions, head: bool) -> Result<(u32, String)> {
    let mut easy = curl::easy::Easy::new();
    easy.url(page_url).context("invalid URL")?;
    easy.nobody(head)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    net.apply(&mut easy)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer
            .perform()
            .with_context(|| format!("request to {} failed", page_url))?;
    }

    let code = easy.response_code().context("no response code")?;
    let effective = easy
        .effective_url()?
        .unwrap_or(page_url)
        .to_string();
    Ok((code, effective))
}

/// Locate the latest release and the installer URL for `arch`.
pub fn locate_latest(
    cfg: &GitfwConfig,
    net: &NetworkOptions,
    arch: Architecture,
) -> Result<ReleaseInfo> {
    let redirect = resolve_redirect(&cfg.release_page_url, net)
        .with_context(|| format!("could not reach release page {}", cfg.release_page_url))?;
    tracing::debug!(redirect = %redirect, "release page resolved");

    let release = parse_release_tag(&redirect)?;
    let download_url = derive_download_url(&cfg.download_url_template, &release, arch);
    tracing::info!(
        tag = %release.tag,
        version = %release.version,
        url = %download_url,
        "located latest release"
    );

    Ok(ReleaseInfo {
        tag: release.tag,
        version: release.version,
        download_url,
    })
}
