//! Recursive copy of local template directories

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Copy every file under `source` into `target`, overwriting existing files
///
/// Fails with [`ScaffoldError::MissingTemplateDir`] before writing anything when
/// `source` is not a directory. Returns the copied paths relative to `target`.
pub fn copy_template(source: &Path, target: &Path) -> Result<Vec<String>> {
    if !source.is_dir() {
        return Err(ScaffoldError::MissingTemplateDir(source.to_path_buf()).into());
    }
    copy_tree(source, target)
}

/// Copy a directory tree that is known to exist
pub(crate) fn copy_tree(source: &Path, target: &Path) -> Result<Vec<String>> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {}", target.display()))?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Template entry outside of template directory")?;
        let target_path = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target_path).with_context(|| {
                format!("Failed to create directory: {}", target_path.display())
            })?;
            continue;
        }

        if let Some(parent) = target_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::copy(entry.path(), &target_path)
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(copied_files)
}
