//! Local installer source: copy a file into the staging area.

use anyhow::{Context, Result};
use std::path::Path;

/// Copy `source` to `dest`. Returns the number of bytes copied.
pub fn copy_to(source: &Path, dest: &Path) -> Result<u64> {
    if !source.is_file() {
        anyhow::bail!("installer not found at {}", source.display());
    }
    std::fs::copy(source, dest)
        .with_context(|| format!("failed to copy {} to {}", source.display(), dest.display()))
}
