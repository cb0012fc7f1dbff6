//! Glob expansion for entry, data and partial patterns.
//!
//! Patterns follow the `glob` crate's syntax:
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components (recursive matching)
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from a set or range
//!
//! Relative patterns are resolved against a base directory, so every match is
//! an absolute path when the base is absolute. Only regular files are
//! returned, in the order the glob walk yields them (sorted per directory).
//!
//! # Examples
//!
//! ```rust,no_run
//! use tplpass::pattern::expand_pattern;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let pages = expand_pattern(Path::new("/project"), "pages/**/*.tera")?;
//! println!("Found {} entry files", pages.len());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::TplError;

/// The files one entry pattern resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatches {
    /// The pattern as configured
    pub pattern: String,
    /// Matching files, in glob order
    pub files: Vec<PathBuf>,
}

/// Join a relative pattern onto `base_dir`; absolute patterns pass through.
///
/// Glob metacharacters in `base_dir` itself are escaped.
pub fn resolve_pattern(base_dir: &Path, pattern: &str) -> String {
    if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = glob::Pattern::escape(&base_dir.to_string_lossy());
        Path::new(&base).join(pattern).to_string_lossy().into_owned()
    }
}

/// Expand one glob pattern into the files it matches.
///
/// # Errors
///
/// Returns [`TplError::InvalidPattern`] for malformed globs and the
/// underlying I/O error when a directory cannot be read during the walk.
pub fn expand_pattern(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let resolved = resolve_pattern(base_dir, pattern);
    debug!("Expanding pattern '{}'", resolved);

    let paths = glob::glob(&resolved).map_err(|e| TplError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(std::io::Error::from)?;
        if path.is_file() {
            trace!("Pattern '{}' matched {}", pattern, path.display());
            files.push(path);
        }
    }

    debug!("Found {} matches for pattern '{}'", files.len(), pattern);
    Ok(files)
}

/// Expand every entry pattern concurrently and wait for all of them.
///
/// Each pattern runs on its own blocking task. The results come back in the
/// order the patterns were given; the first failure aborts the join.
pub async fn expand_entries(base_dir: &Path, patterns: &[String]) -> Result<Vec<PatternMatches>> {
    let tasks = patterns.iter().map(|pattern| {
        let base_dir = base_dir.to_path_buf();
        let pattern = pattern.clone();
        tokio::task::spawn_blocking(move || {
            expand_pattern(&base_dir, &pattern).map(|files| PatternMatches {
                pattern,
                files,
            })
        })
    });

    let joined = try_join_all(tasks).await.context("Failed to join pattern expansion tasks")?;
    joined.into_iter().collect()
}

/// Recursively list the regular files below `dir`, sorted by path.
///
/// Symlinks are not followed.
pub fn walk_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
