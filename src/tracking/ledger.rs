//! The dependency ledger: every file a pass read that should trigger a rebuild.

use std::path::{Path, PathBuf};

/// Flat list of absolute file paths read by the pipeline.
///
/// Duplicates are allowed; the ledger is only ever queried for membership.
/// It grows for the lifetime of its owning pipeline and is never cleared.
#[derive(Debug, Default, Clone)]
pub struct DependencyLedger {
    paths: Vec<PathBuf>,
}

impl DependencyLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file as a dependency.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::trace!("Tracking dependency {}", path.display());
        self.paths.push(path);
    }

    /// Whether `path` has been recorded at least once.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Iterate over recorded paths in insertion order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Number of records, duplicates included.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
