//! Test utilities shared by unit and integration tests.
//!
//! Enabled for `cfg(test)` and with the `test-utils` feature, which the
//! integration test target turns on through the self dev-dependency.
//!
//! # Example
//!
//! ```rust,no_run
//! use tplpass::test_utils::{ProjectFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let project = ProjectFixture::new().unwrap();
//! project.write("pages/index.html.tera", "Hello").unwrap();
//! project.write_config("entry = \"pages/*.tera\"\noutput = \"dist/[name]\"").unwrap();
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_FILE_NAME;
use crate::utils::fs::safe_write;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG` if it is set; with neither,
/// no subscriber is installed.
///
/// ```bash
/// RUST_LOG=tplpass=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A throwaway project directory.
#[derive(Debug)]
pub struct ProjectFixture {
    temp: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("Failed to create temp project")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.temp.path().join(rel)
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        safe_write(&path, content)?;
        Ok(path)
    }

    pub fn write_config(&self, toml: &str) -> Result<PathBuf> {
        self.write(CONFIG_FILE_NAME, toml)
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.path(rel);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Move a file's modification time `offset` into the future, so a
    /// timestamp comparison sees it as changed without sleeping.
    pub fn touch_forward(&self, rel: &str, offset: Duration) -> Result<()> {
        let path = self.path(rel);
        let file = std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.set_modified(SystemTime::now() + offset)
            .with_context(|| format!("Failed to set mtime of {}", path.display()))?;
        Ok(())
    }
}
