//! Notebook discovery in the source directory

use crate::domain::{ConverterError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Compiles a notebook name filter; an empty filter matches everything
pub fn compile_filter(filter: &str) -> Result<Regex> {
    let pattern = if filter.is_empty() { ".*" } else { filter };
    Regex::new(pattern).map_err(|e| {
        ConverterError::InvalidConfiguration(format!("invalid notebook filter '{filter}': {e}"))
    })
}

/// Checks that a directory exists
pub fn ensure_directory(path: &Path, role: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConverterError::InvalidPath(format!(
            "{role} directory {} does not exist",
            path.display()
        )))
    }
}

/// Lists the notebooks to convert
///
/// Both directories are checked before anything is enumerated, then the
/// notebooks are selected as in [`find_notebooks`].
///
/// # Errors
///
/// - [`ConverterError::InvalidPath`] if `source` or `destination` is missing
/// - [`ConverterError::InvalidConfiguration`] if `filter` is not a valid regex
pub async fn list_notebooks(source: &Path, destination: &Path, filter: &str) -> Result<Vec<PathBuf>> {
    ensure_directory(source, "Source")?;
    ensure_directory(destination, "Destination")?;
    find_notebooks(source, filter).await
}

/// Immediate subdirectories of `source` whose names match `filter`, sorted by name
pub async fn find_notebooks(source: &Path, filter: &str) -> Result<Vec<PathBuf>> {
    ensure_directory(source, "Source")?;
    let filter = compile_filter(filter)?;

    let mut notebooks = Vec::new();
    let mut entries = tokio::fs::read_dir(source).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if filter.is_match(&name) {
            notebooks.push(entry.path());
        }
    }

    notebooks.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(
        source = %source.display(),
        count = notebooks.len(),
        "Notebooks discovered"
    );
    Ok(notebooks)
}
