//! Catalog of candidate life config files in the data directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CATALOG_PATTERNS;

/// Checks the startup precondition: the data directory must exist.
///
/// # Errors
///
/// Returns an error if `dir` is missing or is not a directory.
pub fn ensure_data_dir(dir: &Path) -> Result<()> {
    let metadata = fs::metadata(dir).with_context(|| {
        format!(
            "The '{}' directory does not exist or is not accessible",
            dir.display()
        )
    })?;

    if !metadata.is_dir() {
        anyhow::bail!("'{}' is not a directory", dir.display());
    }

    Ok(())
}

/// Returns true if the file name marks a candidate life config.
///
/// This is a substring test, not a suffix test: `archive.yamlx` and
/// `old.yml.bak` both match.
#[must_use]
pub fn is_catalog_candidate(file_name: &str) -> bool {
    CATALOG_PATTERNS
        .iter()
        .any(|pattern| file_name.contains(pattern))
}

/// Lists candidate config files directly inside `dir`.
///
/// Returns paths of the form `dir/<file name>`, sorted by file name.
/// Subdirectories are not descended into.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read.
pub fn scan_catalog(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to open '{}' directory", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;

        let file_type = entry.file_type().context("Failed to read file type")?;
        if file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::debug!(name = ?file_name, "Skipping non UTF-8 file name");
            continue;
        };

        if is_catalog_candidate(name) {
            files.push(dir.join(name));
        }
    }

    files.sort();

    for path in &files {
        tracing::debug!("Found YAML file: {}", path.display());
    }

    Ok(files)
}

/// Label shown for a catalog entry: the path as given.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// Resolves a life config named on the command line against `dir`.
///
/// `ada`, `ada.yaml` and `ada.yml` are accepted; a bare name gets `.yaml`.
#[must_use]
pub fn resolve_config_name(dir: &Path, name: &str) -> PathBuf {
    let has_extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    if has_extension {
        dir.join(name)
    } else {
        dir.join(format!("{name}.yaml"))
    }
}
