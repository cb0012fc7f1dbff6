//! Entry compilation: expand the entry patterns, then compile, render and
//! route every matched file.
//!
//! Per file, the steps run in a fixed order:
//!
//! 1. read the source (tracked in the ledger)
//! 2. `before_compile` hook on the raw text
//! 3. compile into the engine
//! 4. `before_render` hook on a copy of the pass's data context
//! 5. render
//! 6. derive the target path ([`target::target_path`]) and resolve it
//!    against the base directory
//! 7. `before_save` hook on the rendered text
//! 8. route through the [`OutputRouter`]
//! 9. `on_done` hook with the final target
//!
//! Every pattern is expanded before anything compiles. Files compile one at a
//! time, patterns in configured order and files in glob order, so hook calls
//! and log output are deterministic. The first failure aborts the pass.

pub mod target;

pub use target::{OutputFn, OutputSpec, base_name, target_path};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::hooks::ResolvedHooks;
use crate::output::{OutputRouter, Routed};
use crate::pattern::{PatternMatches, expand_entries};
use crate::templating::TemplateEngine;
use crate::tracking::DependencyLedger;

/// One entry file that made it through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub routed: Routed,
}

/// Everything one compile run reads and mutates.
pub struct Compiler<'a> {
    pub base_dir: &'a Path,
    pub output_root: &'a Path,
    pub output: &'a OutputSpec,
    pub hooks: &'a ResolvedHooks,
    pub verbose: bool,
    pub engine: &'a mut TemplateEngine,
    pub ledger: &'a mut DependencyLedger,
    pub router: &'a mut OutputRouter,
}

impl Compiler<'_> {
    /// Expand `entries` concurrently, then compile every match against `data`.
    pub async fn compile_all(&mut self, entries: &[String], data: &Value) -> Result<Vec<CompiledFile>> {
        let matches = expand_entries(self.base_dir, entries).await?;
        self.compile_matches(&matches, data).await
    }

    /// Compile already-expanded patterns. Empty patterns are skipped.
    pub async fn compile_matches(&mut self, matches: &[PatternMatches], data: &Value) -> Result<Vec<CompiledFile>> {
        let mut compiled = Vec::new();

        for PatternMatches { pattern, files } in matches {
            if files.is_empty() {
                warn!("Entry pattern '{}' matched no files", pattern);
                continue;
            }
            debug!("Compiling {} file(s) from '{}'", files.len(), pattern);

            for file in files {
                compiled.push(self.compile_file(file, data).await?);
            }
        }

        Ok(compiled)
    }

    async fn compile_file(&mut self, source_path: &Path, data: &Value) -> Result<CompiledFile> {
        let raw = tokio::fs::read_to_string(source_path)
            .await
            .with_context(|| format!("Failed to read template: {}", source_path.display()))?;
        self.ledger.track(source_path);

        let source = self.hooks.before_compile(raw);
        let template = self.engine.compile(&source_path.to_string_lossy(), &source)?;

        let context = self.hooks.before_render(data.clone());
        let rendered = self.engine.render(&template, &context)?;

        let target = self.resolve_target(source_path);
        let rendered = self.hooks.before_save(rendered, &target);
        let routed = self.router.route(&target, rendered, self.output_root)?;

        match &routed {
            Routed::Asset(name) if self.verbose => info!("Emitted {}", name),
            Routed::Asset(name) => debug!("Emitted {}", name),
            Routed::Written(path) if self.verbose => info!("Created {}", path.display()),
            Routed::Written(path) => debug!("Created {}", path.display()),
        }

        self.hooks.on_done(&target);

        Ok(CompiledFile {
            source: source_path.to_path_buf(),
            target,
            routed,
        })
    }

    fn resolve_target(&self, source: &Path) -> PathBuf {
        let target = target_path(source, self.output);
        if target.is_absolute() { target } else { self.base_dir.join(target) }
    }
}
