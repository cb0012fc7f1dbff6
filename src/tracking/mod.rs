//! Dependency tracking and incremental-rebuild decisions.
//!
//! - [`ledger`] - the append-only list of files the pipeline has read
//! - [`timestamps`] - adapters over host-reported modification times
//! - [`staleness`] - the gate deciding whether a pass recompiles

pub mod ledger;
pub mod staleness;
pub mod timestamps;

pub use ledger::DependencyLedger;
pub use staleness::{StalenessDetector, should_rebuild};
pub use timestamps::{Timestamp, TimestampEntries, TimestampSource, now, timestamp_of};
