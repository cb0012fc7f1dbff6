//! File system helpers for path containment and safe writes.
//!
//! The output router needs two things from the file system: a lexical
//! containment check that does not depend on the target existing yet, and a
//! write that creates missing parent directories and never leaves a partially
//! written file behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components.
///
/// Resolution is purely lexical: symlinks are not followed and the path does
/// not need to exist.
///
/// # Examples
///
/// ```rust,no_run
/// use tplpass::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let path = Path::new("/foo/./bar/../baz");
/// assert_eq!(normalize_path(path), PathBuf::from("/foo/baz"));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {} // Skip .
            Component::ParentDir => {
                components.pop(); // Remove previous component for ..
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Returns the part of `path` below `root`, if `path` is contained in it.
///
/// Both sides are normalized first and compared component by component, so
/// `/out-other/x` is not considered inside `/out`. A path equal to `root`
/// yields an empty relative path.
pub fn relative_within(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = normalize_path(root);
    let path = normalize_path(path);
    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}

/// Ensures a directory exists, creating it and its parents if needed.
fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    Ok(())
}

/// Atomically writes bytes to a file.
///
/// Content goes to a temporary file in the target's directory, is synced, and
/// is then persisted over the target. Readers never observe a partial file.
/// Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;
    temp.persist(path).map_err(|e| e.error).with_context(|| {
        format!("Failed to move temp file into place: {}", path.display())
    })?;

    Ok(())
}

/// Atomically writes a string to a file (see [`atomic_write`]).
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}
