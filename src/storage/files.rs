//! Document file access
//!
//! Documents are read whole and written atomically (temp file + rename), so
//! an interrupted write never leaves a half-written decision record. A path
//! of `-` means stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads a document from `path`, or from stdin when `path` is `-`
pub fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read document from stdin")?;
        return Ok(content);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))
}

/// Writes a document atomically, creating parent directories as needed
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}
