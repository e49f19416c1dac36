mod ordering;

mod source_file;
pub use source_file::*;

use crate::error::BuildError;
use anyhow::{Context, Result};
use globset::Glob;
use std::path::{Path, PathBuf};

/// Default pattern for picking up Markdown files
pub const DEFAULT_PATTERN: &str = "*.md";

/// List the files in `directory` whose names match `pattern`, in chapter order.
///
/// Only the directory itself is scanned; subdirectories are not descended
/// into. The pattern is matched against the file name.
pub fn discover(directory: &Path, pattern: &str) -> Result<Vec<SourceFile>> {
    if !directory.is_dir() {
        return Err(BuildError::Configuration {
            directory: directory.to_path_buf(),
        }
        .into());
    }

    let matcher = Glob::new(pattern)
        .map_err(|e| BuildError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })?
        .compile_matcher();

    let directory = std::path::absolute(directory)
        .with_context(|| format!("Failed to resolve {}", directory.display()))?;

    let mut paths: Vec<PathBuf> = Vec::default();
    let entries = std::fs::read_dir(&directory)
        .with_context(|| format!("Failed to list directory {}", directory.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", directory.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path
            .file_name()
            .map(|name| matcher.is_match(name))
            .unwrap_or(false)
        {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(BuildError::EmptyInput {
            directory,
            pattern: pattern.to_string(),
        }
        .into());
    }

    let mut files = paths
        .into_iter()
        .map(|path| {
            SourceFile::new(&path)
                .with_context(|| format!("Failed to resolve {}", path.display()))
        })
        .collect::<Result<Vec<SourceFile>>>()?;
    files.sort();
    log::debug!("discovered {} source file(s)", files.len());
    Ok(files)
}
