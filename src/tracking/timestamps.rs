//! Host timestamp adapters.
//!
//! Hosts hand over last-modified times either as a keyed map or as a flat list
//! of entries. [`TimestampSource`] hides the difference so the staleness
//! detector only ever sees `keys()` and `get()`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Modification time in milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Read-only view over host-reported file timestamps.
pub trait TimestampSource {
    /// Paths the host reports, in the host's order.
    fn keys(&self) -> Vec<PathBuf>;

    /// Timestamp for `path`. `None` means the host knows the file but has no
    /// time for it.
    fn get(&self, path: &Path) -> Option<Timestamp>;
}

/// Keyed representation: `path -> timestamp`.
impl TimestampSource for HashMap<PathBuf, Timestamp> {
    fn keys(&self) -> Vec<PathBuf> {
        HashMap::keys(self).cloned().collect()
    }

    fn get(&self, path: &Path) -> Option<Timestamp> {
        HashMap::get(self, path).copied()
    }
}

/// Entry-list representation: `[(path, maybe timestamp)]`.
#[derive(Debug, Default, Clone)]
pub struct TimestampEntries(pub Vec<(PathBuf, Option<Timestamp>)>);

impl TimestampSource for TimestampEntries {
    fn keys(&self) -> Vec<PathBuf> {
        self.0.iter().map(|(path, _)| path.clone()).collect()
    }

    fn get(&self, path: &Path) -> Option<Timestamp> {
        self.0.iter().find(|(p, _)| p == path).and_then(|(_, ts)| *ts)
    }
}

/// Convert a [`SystemTime`] to a [`Timestamp`]; times before the epoch map to 0.
pub fn timestamp_of(time: SystemTime) -> Timestamp {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_millis() as Timestamp).unwrap_or(0)
}

/// The current time as a [`Timestamp`].
pub fn now() -> Timestamp {
    timestamp_of(SystemTime::now())
}
