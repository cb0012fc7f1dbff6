//! The host-build surface and a minimal filesystem host.
//!
//! A host build (bundler, dev server, static generator) owns a
//! [`Compilation`] per pass: the output root, the file timestamps it observed,
//! the set of files it watches, and the assets it will write or serve. The
//! [`Pipeline`] reads and fills that context from its two lifecycle points.
//!
//! [`FsHost`] is the simplest possible host: it stats the files the previous
//! pass asked it to watch, runs one pass, and writes every emitted asset under
//! its output directory.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::PendingAssets;
use crate::pipeline::{PassOutcome, Pipeline};
use crate::tracking::{TimestampEntries, TimestampSource, timestamp_of};
use crate::utils::fs::safe_write;

/// A page fragment produced by a companion page generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Output file name, e.g. `about.html`
    pub output_name: String,
    /// Generated markup
    pub html: String,
    /// Loader-style request string naming the page's source template
    pub template: String,
}

/// Per-pass build context shared between host and pipeline.
pub struct Compilation {
    /// Host output root; targets inside it become assets
    pub output_dir: PathBuf,
    /// Modification times the host observed this pass
    pub file_timestamps: Box<dyn TimestampSource + Send + Sync>,
    /// Files the host should watch for the next pass
    pub file_dependencies: BTreeSet<PathBuf>,
    /// Assets the host will write or serve
    pub assets: PendingAssets,
    /// Companion pages generated this pass
    pub pages: Vec<GeneratedPage>,
}

impl Compilation {
    pub fn new(output_dir: impl Into<PathBuf>, file_timestamps: Box<dyn TimestampSource + Send + Sync>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_timestamps,
            file_dependencies: BTreeSet::new(),
            assets: PendingAssets::new(),
            pages: Vec::new(),
        }
    }
}

impl std::fmt::Debug for Compilation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compilation")
            .field("output_dir", &self.output_dir)
            .field("file_timestamps", &self.file_timestamps.keys())
            .field("file_dependencies", &self.file_dependencies)
            .field("assets", &self.assets.keys().collect::<Vec<_>>())
            .field("pages", &self.pages.len())
            .finish()
    }
}

/// Result of one [`FsHost::run_pass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub outcome: PassOutcome,
    /// Asset files written under the output directory
    pub written: Vec<PathBuf>,
}

/// Host that drives passes directly against the filesystem.
#[derive(Debug, Clone)]
pub struct FsHost {
    output_dir: PathBuf,
    watched: BTreeSet<PathBuf>,
    pages: Vec<GeneratedPage>,
}

impl FsHost {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            watched: BTreeSet::new(),
            pages: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Watch an extra file the pipeline itself does not read.
    pub fn watch(&mut self, path: impl Into<PathBuf>) {
        self.watched.insert(path.into());
    }

    pub fn watched(&self) -> impl Iterator<Item = &Path> {
        self.watched.iter().map(PathBuf::as_path)
    }

    /// Attach a companion page to every following pass.
    pub fn add_page(&mut self, page: GeneratedPage) {
        self.pages.push(page);
    }

    /// Current modification times of the watched files. A file that cannot
    /// be stat'ed is reported without a timestamp.
    pub fn snapshot_timestamps(&self) -> TimestampEntries {
        TimestampEntries(
            self.watched
                .iter()
                .map(|path| {
                    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok().map(timestamp_of);
                    (path.clone(), modified)
                })
                .collect(),
        )
    }

    /// Run `before_build` then `emit`, and write the emitted assets.
    pub async fn run_pass(&mut self, pipeline: &mut Pipeline) -> Result<PassReport> {
        let mut compilation = Compilation::new(&self.output_dir, Box::new(self.snapshot_timestamps()));
        compilation.pages = self.pages.clone();

        let outcome = pipeline.before_build(&mut compilation).await?;
        pipeline.emit(&mut compilation);

        self.watched.extend(compilation.file_dependencies);

        let mut written = Vec::with_capacity(compilation.assets.len());
        for (name, asset) in &compilation.assets {
            let path = self.output_dir.join(name);
            safe_write(&path, asset.source())?;
            debug!("Wrote asset {} ({} bytes)", path.display(), asset.size());
            written.push(path);
        }

        Ok(PassReport {
            outcome,
            written,
        })
    }
}
