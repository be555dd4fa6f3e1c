//! Deterministic discovery of candidate image files.
//!
//! Repeated runs over an unchanged folder must produce the same file
//! order, because slide order is defined by it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Case-insensitive file-extension filter.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter from configured extension strings.
    ///
    /// Entries are lowercased and given a leading dot when missing, so
    /// `png`, `.png` and `.PNG` all mean the same thing. Blank entries
    /// are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .filter(|ext| ext.len() > 1)
            .collect();
        Self { suffixes }
    }

    /// Whether `file_name` carries one of the configured extensions.
    pub fn matches(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix))
    }

    /// Whether the filter accepts nothing at all.
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Normalized suffixes, for logging.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// List candidate images in `dir`, sorted lexicographically by file name.
///
/// Only regular files are considered; subdirectories are skipped.
/// A missing or unreadable directory is fatal, while a directory with
/// no matching files yields an empty list.
pub fn list_images(dir: &Path, filter: &ExtensionFilter) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::InputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // Names that are not valid UTF-8 cannot be matched against the
        // configured extension strings; skip them.
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!(
                "Skipping '{}': file name is not valid UTF-8",
                path.display()
            );
            continue;
        };
        if filter.matches(name) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
