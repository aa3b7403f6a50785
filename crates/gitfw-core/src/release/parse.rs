//! Version extraction from the "latest release" redirect target and download
//! URL derivation.

use crate::arch::Architecture;
use crate::error::InstallError;

/// Suffix Git for Windows appends to upstream Git versions in release tags.
const WINDOWS_SUFFIX: &str = ".windows.";

/// Release identified from the redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    /// Tag as it appears in the URL, e.g. `v2.47.1.windows.2`.
    pub tag: String,
    /// Version as used in asset names, e.g. `2.47.1.2`.
    pub version: String,
}

/// Extract the release tag and asset version from a redirect target such as
/// `https://github.com/git-for-windows/git/releases/tag/v2.47.1.windows.1`.
///
/// `.windows.1` is dropped; `.windows.N` for N > 1 becomes `.N`.
pub fn parse_release_tag(redirect_url: &str) -> Result<ReleaseTag, InstallError> {
    let fail = || InstallError::ReleaseTag(redirect_url.to_string());

    let parsed = url::Url::parse(redirect_url).map_err(|_| fail())?;
    let tag = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(fail)?
        .to_string();

    let rest = tag.strip_prefix('v').ok_or_else(fail)?;
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(fail());
    }

    let version = match rest.split_once(WINDOWS_SUFFIX) {
        Some((base, "1")) => base.to_string(),
        Some((base, build)) if !build.is_empty() && build.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}.{}", base, build)
        }
        Some(_) => return Err(fail()),
        None => rest.to_string(),
    };

    Ok(ReleaseTag { tag, version })
}

/// Substitute `{tag}`, `{version}` and `{arch}` in `template`.
pub fn derive_download_url(template: &str, release: &ReleaseTag, arch: Architecture) -> String {
    template
        .replace("{tag}", &release.tag)
        .replace("{version}", &release.version)
        .replace("{arch}", arch.token())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DOWNLOAD_URL_TEMPLATE;

    #[test]
    fn strips_prefix_and_first_build_suffix() {
        let r = parse_release_tag(
            "https://github.com/git-for-windows/git/releases/tag/v2.47.1.windows.1",
        )
        .unwrap();
        assert_eq!(r.tag, "v2.47.1.windows.1");
        assert_eq!(r.version, "2.47.1");
    }

    #[test]
    fn later_builds_keep_build_number() {
        let r = parse_release_tag(
            "https://github.com/git-for-windows/git/releases/tag/v2.45.2.windows.2",
        )
        .unwrap();
        assert_eq!(r.version, "2.45.2.2");
    }

    #[test]
    fn ignores_trailing_slash_and_query() {
        let r = parse_release_tag(
            "https://github.com/git-for-windows/git/releases/tag/v2.40.0.windows.1/?from=latest",
        )
        .unwrap();
        assert_eq!(r.tag, "v2.40.0.windows.1");
        assert_eq!(r.version, "2.40.0");
    }

    #[test]
    fn tag_without_windows_suffix_is_kept() {
        let r = parse_release_tag("https://example.com/releases/tag/v3.0.0").unwrap();
        assert_eq!(r.version, "3.0.0");
    }

    #[test]
    fn redirect_without_tag_is_rejected() {
        for url in [
            "https://github.com/git-for-windows/git/releases",
            "https://github.com/",
            "https://github.com/git-for-windows/git/releases/tag/nightly",
            "https://github.com/git-for-windows/git/releases/tag/v2.47.1.windows.rc",
            "not a url",
        ] {
            assert!(
                matches!(parse_release_tag(url), Err(InstallError::ReleaseTag(_))),
                "{}",
                url
            );
        }
    }

    #[test]
    fn derives_github_asset_url() {
        let r = parse_release_tag(
            "https://github.com/git-for-windows/git/releases/tag/v2.47.1.windows.1",
        )
        .unwrap();
        assert_eq!(
            derive_download_url(DEFAULT_DOWNLOAD_URL_TEMPLATE, &r, Architecture::Bit64),
            "https://github.com/git-for-windows/git/releases/download/v2.47.1.windows.1/Git-2.47.1-64-bit.exe"
        );
        assert_eq!(
            derive_download_url(DEFAULT_DOWNLOAD_URL_TEMPLATE, &r, Architecture::Bit32),
            "https://github.com/git-for-windows/git/releases/download/v2.47.1.windows.1/Git-2.47.1-32-bit.exe"
        );
    }
}
