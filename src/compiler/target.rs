//! Target path derivation for rendered entries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::NAME_TOKEN;

/// Callback computing a target path from `(base_name, source_path)`.
pub type OutputFn = Arc<dyn Fn(&str, &Path) -> PathBuf + Send + Sync>;

/// How an entry's output path is computed.
#[derive(Clone, Default)]
pub enum OutputSpec {
    /// Same directory as the source, extension removed
    #[default]
    StripExtension,
    /// A path template; every `[name]` becomes the source's base name
    Template(String),
    /// A callback whose return value is used verbatim
    Callback(OutputFn),
}

impl std::fmt::Debug for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StripExtension => write!(f, "StripExtension"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

/// Base name of a source file: its file name without the last extension.
pub fn base_name(source: &Path) -> String {
    source.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Compute where the rendered output of `source` goes.
///
/// The result may be relative (for a relative template or source); callers
/// resolve it against their base directory.
pub fn target_path(source: &Path, output: &OutputSpec) -> PathBuf {
    match output {
        OutputSpec::StripExtension => source.with_extension(""),
        OutputSpec::Template(template) => PathBuf::from(template.replace(NAME_TOKEN, &base_name(source))),
        OutputSpec::Callback(callback) => callback(&base_name(source), source),
    }
}
