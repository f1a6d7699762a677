use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write the extracted text to `path`, creating missing parent directories
/// first. An existing file is overwritten. Directories created here are not
/// rolled back if the write itself fails.
pub fn write_extraction(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }

    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
