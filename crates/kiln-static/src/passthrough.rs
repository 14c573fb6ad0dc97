//! Verbatim file copies from the input root to the output root.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::builder::BuildError;

/// Extensions the host treats as templates rather than static files.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["njk", "md", "html", "liquid"];

/// Copy one file byte-for-byte, creating parent directories.
pub(crate) fn copy_file(source: &Path, target: &Path) -> Result<(), BuildError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", parent.display(), e)))?;
    }

    fs::copy(source, target)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;

    tracing::debug!("Copied {} -> {}", source.display(), target.display());

    Ok(())
}

/// Copy a file or a whole directory. Returns the number of files copied.
pub(crate) fn copy_path(source: &Path, target: &Path) -> Result<usize, BuildError> {
    if !source.is_dir() {
        copy_file(source, target)?;
        return Ok(1);
    }

    let mut count = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        copy_file(entry.path(), &target.join(relative))?;
        count += 1;
    }

    Ok(count)
}

/// Whether a path names a template file.
pub fn is_template(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            TEMPLATE_EXTENSIONS
                .iter()
                .any(|t| t.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Find every non-template file under `input`, skipping the `excluded` trees.
pub(crate) fn collect_static_files(
    input: &Path,
    excluded: &[&Path],
) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !excluded.iter().any(|ex| e.path().starts_with(ex)));

    for entry in walker {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let path = entry.path();

        if entry.file_type().is_file() && !is_template(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Copy every file in `files` from below `input` to the same place below `output`.
pub(crate) fn copy_static_files(
    files: &[PathBuf],
    input: &Path,
    output: &Path,
) -> Result<usize, BuildError> {
    let results: Vec<Result<(), BuildError>> = files
        .par_iter()
        .map(|path| {
            let relative = path.strip_prefix(input).unwrap_or(path);
            copy_file(path, &output.join(relative))
        })
        .collect();

    for result in results {
        result?;
    }

    Ok(files.len())
}
