//! Configuration for a template pass.
//!
//! Two layers exist:
//!
//! - [`Config`]: the file-driven settings read from `tplpass.toml`
//! - [`Options`]: everything a [`Pipeline`](crate::pipeline::Pipeline) needs,
//!   including the code-only pieces (helpers, an output-path callback and the
//!   lifecycle hooks) that cannot live in a file
//!
//! # Configuration File (`tplpass.toml`)
//!
//! ```toml
//! # Required: one glob or a list of globs
//! entry = ["pages/**/*.html.tera", "emails/*.tera"]
//!
//! # Optional: `[name]` is replaced by the entry's file stem.
//! # Omit to write next to the source with the extension stripped.
//! output = "dist/[name]"
//!
//! # Optional: a glob of JSON files (one top-level key per file stem)...
//! data = "data/*.json"
//! # ...or an inline table used verbatim
//! # [data]
//! # title = "My Site"
//!
//! # Optional: a directory, a glob, a list of those, or an explicit table
//! partials = ["partials", "layouts/*.tera"]
//!
//! # Host output root; targets inside it become in-memory assets
//! output_dir = "dist"
//!
//! verbose = false
//!
//! [pages]
//! enabled = false
//! prefix = "html"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::compiler::{OutputFn, OutputSpec};
use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_PREFIX};
use crate::core::TplError;
use crate::hooks::Hooks;
use crate::templating::{DataSource, Helper, PartialSource};

/// Contents of `tplpass.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Entry globs, in compile order.
    #[serde(deserialize_with = "one_or_many")]
    pub entry: Vec<String>,

    /// Output path template containing `[name]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default)]
    pub data: DataSource,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub partials: Vec<PartialSource>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub pages: PagesConfig,
}

/// Companion page-generator integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Partial name prefix for generated pages (`<prefix>/<stem>`).
    #[serde(default = "default_page_prefix")]
    pub prefix: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prefix: default_page_prefix(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_page_prefix() -> String {
    DEFAULT_PAGE_PREFIX.to_string()
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(values) => values,
        OneOrMany::One(value) => vec![value],
    })
}

impl Config {
    /// Parse and validate a config from TOML text. `file` is only used in
    /// error messages.
    pub fn parse(content: &str, file: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| TplError::ConfigParseError {
            file: file.display().to_string(),
            reason: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TplError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content, path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(TplError::InvalidConfig {
                reason: "`entry` must name at least one glob pattern".into(),
            }
            .into());
        }
        if let Some(index) = self.entry.iter().position(|e| e.trim().is_empty()) {
            return Err(TplError::InvalidConfig {
                reason: format!("`entry[{index}]` is empty"),
            }
            .into());
        }
        if self.pages.enabled && self.pages.prefix.is_empty() {
            return Err(TplError::InvalidConfig {
                reason: "`pages.prefix` must not be empty".into(),
            }
            .into());
        }
        Ok(())
    }

    /// The host output root, resolved against `base_dir`.
    pub fn output_root(&self, base_dir: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            base_dir.join(&self.output_dir)
        }
    }
}

/// Everything needed to build a pipeline.
#[derive(Clone)]
pub struct Options {
    pub base_dir: PathBuf,
    pub entries: Vec<String>,
    pub output: OutputSpec,
    pub data: DataSource,
    pub partials: Vec<PartialSource>,
    pub helpers: BTreeMap<String, Helper>,
    pub pages: PagesConfig,
    pub verbose: bool,
    pub hooks: Hooks,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("base_dir", &self.base_dir)
            .field("entries", &self.entries)
            .field("output", &self.output)
            .field("data", &self.data)
            .field("partials", &self.partials)
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .field("pages", &self.pages)
            .field("verbose", &self.verbose)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl Options {
    /// Options with the given entry globs and defaults everywhere else.
    pub fn new<I, S>(base_dir: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_dir: base_dir.into(),
            entries: entries.into_iter().map(Into::into).collect(),
            output: OutputSpec::default(),
            data: DataSource::default(),
            partials: Vec::new(),
            helpers: BTreeMap::new(),
            pages: PagesConfig::default(),
            verbose: false,
            hooks: Hooks::default(),
        }
    }

    /// Build options from a parsed config file.
    pub fn from_config(config: &Config, base_dir: impl Into<PathBuf>) -> Self {
        let mut options = Self::new(base_dir, config.entry.iter().cloned());
        if let Some(template) = &config.output {
            options.output = OutputSpec::Template(template.clone());
        }
        options.data = config.data.clone();
        options.partials = config.partials.clone();
        options.pages = config.pages.clone();
        options.verbose = config.verbose;
        options
    }

    #[must_use]
    pub fn with_output(mut self, template: impl Into<String>) -> Self {
        self.output = OutputSpec::Template(template.into());
        self
    }

    #[must_use]
    pub fn with_output_fn(mut self, callback: OutputFn) -> Self {
        self.output = OutputSpec::Callback(callback);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: DataSource) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_partials(mut self, source: PartialSource) -> Self {
        self.partials.push(source);
        self
    }

    #[must_use]
    pub fn with_helper(mut self, name: impl Into<String>, helper: Helper) -> Self {
        self.helpers.insert(name.into(), helper);
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn with_pages(mut self, prefix: impl Into<String>) -> Self {
        self.pages = PagesConfig {
            enabled: true,
            prefix: prefix.into(),
        };
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::parse(r#"entry = "pages/*.tera""#, Path::new("tplpass.toml")).unwrap();
        assert_eq!(config.entry, ["pages/*.tera"]);
        assert_eq!(config.output, None);
        assert_eq!(config.data, DataSource::default());
        assert!(config.partials.is_empty());
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert!(!config.pages.enabled);
        assert_eq!(config.pages.prefix, "html");
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
entry = ["a/*.tera", "b/*.tera"]
output = "out/[name].html"
data = "data/*.json"
partials = ["partials", { "layout/base" = "layouts/base.tera" }]
output_dir = "public"
verbose = true

[pages]
enabled = true
prefix = "page"
"#;
        let config = Config::parse(toml, Path::new("tplpass.toml")).unwrap();

        assert_eq!(config.entry.len(), 2);
        assert_eq!(config.data, DataSource::Glob("data/*.json".into()));
        assert_eq!(config.partials[0], PartialSource::Pattern("partials".into()));
        assert_eq!(
            config.partials[1],
            PartialSource::Map(BTreeMap::from([("layout/base".into(), PathBuf::from("layouts/base.tera"))]))
        );
        assert_eq!(config.output_root(Path::new("/p")), PathBuf::from("/p/public"));
        assert!(config.verbose);
        assert_eq!(config.pages.prefix, "page");
    }

    #[test]
    fn test_inline_data_and_single_partial_table() {
        let toml = r#"
entry = "x.tera"

[data]
title = "Hi"

[partials]
"nav/main" = "nav.tera"
"#;
        let config = Config::parse(toml, Path::new("tplpass.toml")).unwrap();
        assert_eq!(config.data, DataSource::Inline(json!({"title": "Hi"})));
        assert_eq!(config.partials.len(), 1);
        assert!(matches!(config.partials[0], PartialSource::Map(_)));
    }

    #[test]
    fn test_invalid_configs() {
        let err = Config::parse("entry = []", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<TplError>(), Some(TplError::InvalidConfig { .. })));

        let err = Config::parse("output = \"x\"", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<TplError>(), Some(TplError::ConfigParseError { .. })));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("tplpass.toml")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<TplError>(), Some(TplError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_options_from_config() {
        let config = Config::parse("entry = \"p/*.tera\"\noutput = \"dist/[name]\"", Path::new("t.toml")).unwrap();
        let options = Options::from_config(&config, "/proj").verbose(true);

        assert_eq!(options.base_dir, PathBuf::from("/proj"));
        assert_eq!(options.entries, ["p/*.tera"]);
        assert!(matches!(&options.output, OutputSpec::Template(t) if t == "dist/[name]"));
        assert!(options.verbose);
    }
}
