//! Partial discovery and registration.
//!
//! Partials are reloaded on every compiling pass. Registration overwrites by
//! name, so an edited partial takes effect on the next pass without any
//! explicit invalidation.
//!
//! # Naming
//!
//! A partial found through a glob or a directory is named after its parent
//! directory and file stem: `templates/partials/header.tera` becomes
//! `partials/header`, and `layout/nav/main.tera` becomes `nav/main`. Entries
//! of an explicit map keep their configured names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::engine::TemplateEngine;
use crate::hooks::ResolvedHooks;
use crate::pattern::{expand_pattern, walk_files};
use crate::tracking::DependencyLedger;

/// Resolved partials: name to source file.
pub type PartialMap = BTreeMap<String, PathBuf>;

/// One configured partial source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartialSource {
    /// A directory (walked recursively) or a glob pattern
    Pattern(String),
    /// Explicit `name -> path` pairs
    Map(BTreeMap<String, PathBuf>),
}

/// Derive a partial name from its file path.
pub fn partial_name(path: &Path) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(dir) => format!("{}/{}", dir.to_string_lossy(), stem),
        None => stem,
    }
}

/// Loads configured partials into a [`TemplateEngine`].
#[derive(Debug, Clone)]
pub struct PartialRegistrar {
    base_dir: PathBuf,
    sources: Vec<PartialSource>,
}

impl PartialRegistrar {
    pub fn new(base_dir: impl Into<PathBuf>, sources: Vec<PartialSource>) -> Self {
        Self {
            base_dir: base_dir.into(),
            sources,
        }
    }

    /// Resolve every source into a name map. Later sources win on name clashes.
    pub fn resolve(&self) -> Result<PartialMap> {
        let mut map = PartialMap::new();

        for source in &self.sources {
            match source {
                PartialSource::Pattern(pattern) => {
                    let dir = self.base_dir.join(pattern);
                    let files =
                        if dir.is_dir() { walk_files(&dir)? } else { expand_pattern(&self.base_dir, pattern)? };
                    for file in files {
                        map.insert(partial_name(&file), file);
                    }
                }
                PartialSource::Map(entries) => {
                    for (name, path) in entries {
                        map.insert(name.clone(), self.base_dir.join(path));
                    }
                }
            }
        }

        Ok(map)
    }

    /// Resolve, let the before-add-partials hook adjust the map, then read and
    /// register every partial. Returns the number registered.
    pub fn load_partials(
        &self,
        engine: &mut TemplateEngine,
        ledger: &mut DependencyLedger,
        hooks: &ResolvedHooks,
    ) -> Result<usize> {
        let resolved = self.resolve()?;
        let partials = hooks.before_add_partials(engine, resolved);

        for (name, path) in &partials {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read partial '{}': {}", name, path.display()))?;
            ledger.track(path);
            engine.register(name, &source)?;
        }

        tracing::debug!("Registered {} partial(s)", partials.len());
        Ok(partials.len())
    }
}
