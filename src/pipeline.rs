//! The top-level pipeline: one instance per configured template pass.
//!
//! A host drives the pipeline through two lifecycle points per build pass:
//!
//! 1. [`Pipeline::before_build`] asks the staleness detector whether any
//!    tracked dependency changed, and if so runs the whole pass: refresh
//!    partials, register companion pages, resolve data, expand entries and
//!    compile every match.
//! 2. [`Pipeline::emit`] hands the ledger to the host as watched files and
//!    copies the pending assets into the host's asset collection.
//!
//! The pipeline owns its ledger, timestamp snapshot, pending assets and
//! template engine. Nothing is shared between instances.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::compiler::{CompiledFile, Compiler};
use crate::config::Options;
use crate::core::TplError;
use crate::hooks::ResolvedHooks;
use crate::host::{Compilation, GeneratedPage};
use crate::output::{OutputRouter, PendingAssets};
use crate::templating::{PartialRegistrar, TemplateEngine, register_helpers, resolve_data};
use crate::tracking::{DependencyLedger, StalenessDetector, now};
use crate::utils::fs::normalize_path;

/// What a call to [`Pipeline::before_build`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// No tracked dependency changed; the previous output stands.
    Skipped,
    /// Every entry was recompiled.
    Compiled { files: Vec<CompiledFile> },
}

impl PassOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

pub struct Pipeline {
    options: Options,
    hooks: ResolvedHooks,
    engine: TemplateEngine,
    registrar: PartialRegistrar,
    ledger: DependencyLedger,
    staleness: StalenessDetector,
    router: OutputRouter,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("engine", &self.engine)
            .field("ledger", &self.ledger)
            .field("pending", &self.router.pending().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Build a pipeline: resolve hooks, register helpers, then run `setup`.
    ///
    /// A relative `base_dir` is resolved against the current directory here,
    /// so every tracked path is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`TplError::InvalidConfig`] when no entry pattern is given.
    pub fn new(mut options: Options) -> Result<Self> {
        if options.entries.is_empty() {
            return Err(TplError::InvalidConfig {
                reason: "at least one entry pattern is required".into(),
            }
            .into());
        }

        options.base_dir = absolute_dir(&options.base_dir)?;

        let hooks = options.hooks.clone().resolve();
        let mut engine = TemplateEngine::new();
        register_helpers(&mut engine, &options.helpers);
        hooks.setup(&mut engine);

        let registrar = PartialRegistrar::new(&options.base_dir, options.partials.clone());

        Ok(Self {
            options,
            hooks,
            engine,
            registrar,
            ledger: DependencyLedger::new(),
            staleness: StalenessDetector::new(now()),
            router: OutputRouter::new(),
        })
    }

    /// Gate on staleness, then run a full compile pass if needed.
    pub async fn before_build(&mut self, compilation: &mut Compilation) -> Result<PassOutcome> {
        if !self.staleness.should_rebuild(compilation.file_timestamps.as_ref(), &self.ledger) {
            debug!("No tracked dependency changed, skipping template pass");
            return Ok(PassOutcome::Skipped);
        }

        let files = self.compile_pass(compilation).await?;
        if self.options.verbose {
            info!("Compiled {} template(s)", files.len());
        } else {
            debug!("Compiled {} template(s)", files.len());
        }
        Ok(PassOutcome::Compiled { files })
    }

    /// Run one full pass. Pending assets are replaced only when every entry
    /// compiled; after a failure the previous complete set stays in place.
    async fn compile_pass(&mut self, compilation: &Compilation) -> Result<Vec<CompiledFile>> {
        self.registrar.load_partials(&mut self.engine, &mut self.ledger, &self.hooks)?;
        if self.options.pages.enabled {
            self.register_pages(&compilation.pages)?;
        }

        let data = resolve_data(&self.options.data, &self.options.base_dir, &mut self.ledger)?;

        let output_root = absolute_dir(&compilation.output_dir)?;
        let mut router = OutputRouter::new();
        let mut compiler = Compiler {
            base_dir: &self.options.base_dir,
            output_root: &output_root,
            output: &self.options.output,
            hooks: &self.hooks,
            verbose: self.options.verbose,
            engine: &mut self.engine,
            ledger: &mut self.ledger,
            router: &mut router,
        };
        let files = compiler.compile_all(&self.options.entries, &data).await?;

        self.router = router;
        Ok(files)
    }

    /// Register every companion page as partial `<prefix>/<stem>` and track
    /// its source template.
    fn register_pages(&mut self, pages: &[GeneratedPage]) -> Result<()> {
        for page in pages {
            let stem = Path::new(&page.output_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| page.output_name.clone());
            let name = format!("{}/{}", self.options.pages.prefix, stem);
            self.engine.register(&name, &page.html)?;
            debug!("Registered page '{}' as partial '{}'", page.output_name, name);

            match page_template_source(&page.template) {
                Some(source) if source.is_file() => self.ledger.track(source),
                Some(source) => {
                    warn!("Source template for page '{}' not found: {}", page.output_name, source.display());
                }
                None => {
                    warn!("Could not determine the source template of page '{}' from '{}'", page.output_name, page.template);
                }
            }
        }
        Ok(())
    }

    /// Register ledger paths as watched files and copy the pending assets
    /// into the host's collection.
    pub fn emit(&self, compilation: &mut Compilation) {
        compilation.file_dependencies.extend(self.ledger.iter().map(Path::to_path_buf));
        for (name, asset) in self.router.pending() {
            compilation.assets.insert(name.clone(), asset.clone());
        }
    }

    pub fn ledger(&self) -> &DependencyLedger {
        &self.ledger
    }

    pub fn pending_assets(&self) -> &PendingAssets {
        self.router.pending()
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    let absolute =
        std::path::absolute(dir).with_context(|| format!("Failed to resolve directory {}", dir.display()))?;
    Ok(normalize_path(&absolute))
}

/// Recover the template path from a loader-style request string.
///
/// `"html-loader!/abs/page.html?minimize"` yields `/abs/page.html`; a bare
/// absolute path is returned as is. Relative results are rejected.
pub fn page_template_source(request: &str) -> Option<PathBuf> {
    // loader1!loader2!/abs/page.html?query
    let re = Regex::new(r"(?:^|!)(?P<path>[^!?]+)(?:\?[^!]*)?$").ok()?;
    let captures = re.captures(request.trim())?;
    let path = PathBuf::from(captures.name("path")?.as_str());
    path.is_absolute().then_some(path)
}
