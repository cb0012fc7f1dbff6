//! Staleness detection: should this pass recompile at all?
//!
//! A file counts as changed when its previously observed timestamp (or, the
//! first time it is seen, the pipeline's start time) is older than the
//! timestamp the host reports now. A missing current timestamp counts as
//! infinitely new.
//!
//! The decision is conservative. A pass recompiles when:
//! - nothing has been observed before (first check),
//! - the host reports no changed file at all, or
//! - any changed file is in the dependency ledger.
//!
//! The second rule also fires when the host hands over an empty or unchanged
//! timestamp set, so some passes recompile redundantly. Only a pass whose
//! changes are all outside the ledger is skipped.

use std::collections::HashMap;
use std::path::PathBuf;

use super::ledger::DependencyLedger;
use super::timestamps::{Timestamp, TimestampSource};

/// Stateful detector holding the previous timestamp snapshot.
#[derive(Debug, Clone)]
pub struct StalenessDetector {
    start_time: Timestamp,
    snapshot: HashMap<PathBuf, Option<Timestamp>>,
}

impl StalenessDetector {
    /// Create a detector whose unseen files are compared against `start_time`.
    #[must_use]
    pub fn new(start_time: Timestamp) -> Self {
        Self {
            start_time,
            snapshot: HashMap::new(),
        }
    }

    /// Last observed timestamp for a path, if it was ever reported.
    pub fn previous(&self, path: &std::path::Path) -> Option<Option<Timestamp>> {
        self.snapshot.get(path).copied()
    }

    /// Decide whether the pass must recompile.
    ///
    /// Every reported path's snapshot entry is overwritten with the current
    /// value, changed or not.
    pub fn should_rebuild(
        &mut self,
        current: &dyn TimestampSource,
        ledger: &DependencyLedger,
    ) -> bool {
        let first_check = self.snapshot.is_empty();
        let mut changed = Vec::new();

        for path in current.keys() {
            let now = current.get(&path);
            let before = self.snapshot.get(&path).copied().flatten().unwrap_or(self.start_time);

            let is_newer = match now {
                Some(now) => before < now,
                None => true,
            };

            self.snapshot.insert(path.clone(), now);

            if is_newer {
                changed.push(path);
            }
        }

        if first_check {
            tracing::debug!("First staleness check, recompiling");
            return true;
        }

        if changed.is_empty() {
            tracing::debug!("No changed files reported, recompiling");
            return true;
        }

        let tracked: Vec<_> = changed.iter().filter(|p| ledger.contains(p)).collect();
        if tracked.is_empty() {
            tracing::debug!("{} changed file(s), none tracked; skipping pass", changed.len());
            false
        } else {
            tracing::debug!(
                "{} tracked dependency changed (first: {})",
                tracked.len(),
                tracked[0].display()
            );
            true
        }
    }
}

/// One-shot form of [`StalenessDetector::should_rebuild`] over an explicit
/// snapshot map.
pub fn should_rebuild(
    current: &dyn TimestampSource,
    ledger: &DependencyLedger,
    previous: &mut HashMap<PathBuf, Option<Timestamp>>,
    build_start_time: Timestamp,
) -> bool {
    let mut detector = StalenessDetector {
        start_time: build_start_time,
        snapshot: std::mem::take(previous),
    };
    let result = detector.should_rebuild(current, ledger);
    *previous = detector.snapshot;
    result
}
