//! Data loading for the render context.
//!
//! The context is recomputed in full at the start of every compiling pass, so
//! an edited data file is picked up without restarting the build.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::pattern::expand_pattern;
use crate::tracking::DependencyLedger;

/// Where the render context comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSource {
    /// Glob of JSON files; each file becomes one top-level key named after its
    /// file stem.
    Glob(String),
    /// Structured value used verbatim.
    Inline(Value),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Inline(Value::Object(Map::new()))
    }
}

/// Resolve `source` into a render context.
///
/// Every matched data file that was read is tracked in `ledger`, including
/// files that fail to parse. A file that is not valid JSON is skipped with a
/// warning; a file that cannot be read aborts with the I/O error.
pub fn resolve_data(
    source: &DataSource,
    base_dir: &Path,
    ledger: &mut DependencyLedger,
) -> Result<Value> {
    let pattern = match source {
        DataSource::Inline(value) => return Ok(value.clone()),
        DataSource::Glob(pattern) => pattern,
    };

    let mut context = Map::new();
    for path in expand_pattern(base_dir, pattern)? {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        ledger.track(&path);

        let key = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                tracing::debug!("Loaded data '{}' from {}", key, path.display());
                context.insert(key, value);
            }
            Err(e) => {
                tracing::warn!("Skipping data file {}: not valid JSON ({})", path.display(), e);
            }
        }
    }

    Ok(Value::Object(context))
}
