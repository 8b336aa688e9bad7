//! Local file helpers: markdown discovery, scratch staging and in-place writes

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Expand files and directories into the markdown files they contain.
///
/// Explicitly named files are kept whatever their extension.
pub fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().to_owned());
                }
            }
        }
    }
    files
}

/// Replace `path` with `content` through a temporary file in the same directory.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `bytes` under `root` at the repository-relative `repo_path`,
/// creating parent directories. Returns the local path.
pub fn stage_file(root: &Path, repo_path: &str, bytes: &[u8]) -> Result<PathBuf> {
    let local = root.join(repo_path);
    if let Some(parent) = local.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&local, bytes)?;
    Ok(local)
}
