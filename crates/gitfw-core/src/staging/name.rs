//! Installer file name derivation, safe for Windows file systems.

use percent_encoding::percent_decode_str;

/// Used when the source yields no usable file name.
pub const DEFAULT_INSTALLER_NAME: &str = "git-installer.exe";

/// Characters Windows refuses in file names.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Last path segment of `url`, percent-decoded, or `None` for root/empty paths.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let segment = percent_decode_str(segment).decode_utf8().ok()?.into_owned();
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

/// Sanitizes a candidate filename for Windows.
///
/// - Replaces reserved characters, control characters and whitespace with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots, spaces and underscores
/// - Limits length to 255 bytes
pub fn sanitize_file_name(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if RESERVED.contains(&c) || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name for a staged installer fetched from `source` (URL or local path).
pub fn installer_file_name(candidate: Option<&str>) -> String {
    let sanitized = candidate.map(sanitize_file_name).unwrap_or_default();
    if sanitized.is_empty() {
        DEFAULT_INSTALLER_NAME.to_string()
    } else {
        sanitized
    }
}
