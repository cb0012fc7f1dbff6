//! Output routing: in-memory assets for the host, or direct writes.
//!
//! A rendered document whose target lies inside the host's output root is
//! kept as a [`PendingAsset`] keyed by its path relative to that root. The
//! host copies the pending map into its own asset collection when it emits,
//! which is what lets a dev server serve (and live-reload) the document.
//!
//! A target outside the output root is written to disk immediately, creating
//! parent directories as needed. Those files get no live-reload support.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::fs::{relative_within, safe_write};

/// A rendered document waiting for the host to pick it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsset {
    content: Arc<str>,
}

impl PendingAsset {
    pub fn new(content: impl Into<Arc<str>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The document's content.
    pub fn source(&self) -> &str {
        &self.content
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Pending assets keyed by path relative to the output root, `/`-separated.
pub type PendingAssets = BTreeMap<String, PendingAsset>;

/// Where a rendered document went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Registered as a pending asset under this name
    Asset(String),
    /// Written directly to this path
    Written(PathBuf),
}

/// Routes rendered documents and owns the pending asset map.
#[derive(Debug, Default, Clone)]
pub struct OutputRouter {
    pending: PendingAssets,
}

impl OutputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one fully rendered document.
    pub fn route(&mut self, target: &Path, content: String, output_root: &Path) -> Result<Routed> {
        if let Some(relative) = relative_within(output_root, target) {
            let name = asset_name(&relative);
            tracing::trace!("Queued asset '{}' ({} bytes)", name, content.len());
            self.pending.insert(name.clone(), PendingAsset::new(content));
            return Ok(Routed::Asset(name));
        }

        safe_write(target, &content)?;
        tracing::trace!("Wrote {} ({} bytes) outside the output root", target.display(), content.len());
        Ok(Routed::Written(target.to_path_buf()))
    }

    /// The current pending assets.
    pub fn pending(&self) -> &PendingAssets {
        &self.pending
    }
}

/// Join path components with `/`, dropping any leading separators.
fn asset_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .trim_start_matches('/')
        .to_string()
}
