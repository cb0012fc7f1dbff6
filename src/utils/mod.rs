//! Cross-cutting utilities.

pub mod fs;

pub use fs::{atomic_write, normalize_path, relative_within, safe_write};
