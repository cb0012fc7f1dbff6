//! tplpass - incremental template compilation for asset builds
//!
//! `tplpass` renders a set of Tera templates against a data context and a
//! registry of partials and helpers, and decides on every build pass whether
//! re-rendering is needed at all. It is meant to be embedded in a larger
//! build: the host drives passes through two lifecycle points and receives the
//! rendered documents either as in-memory assets (so a dev server can serve
//! them) or as files written straight to disk.
//!
//! # Architecture Overview
//!
//! A pass flows through these pieces:
//!
//! - [`tracking`] - the dependency ledger, timestamp adapters and the
//!   staleness detector that gates each pass
//! - [`templating`] - the Tera-backed engine, data loader, partial registrar
//!   and helper registration
//! - [`pattern`] - glob expansion for entry patterns
//! - [`compiler`] - per-file read, compile, render and target path derivation
//! - [`output`] - routing rendered documents to pending assets or to disk
//! - [`hooks`] - the six lifecycle extension points
//! - [`pipeline`] - the top-level [`pipeline::Pipeline`] tying it together
//! - [`host`] - the host-facing build context and a filesystem host
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`config`] - `tplpass.toml` parsing and code-level options
//! - [`core`] - error types and user-friendly error reporting
//! - [`utils`] - filesystem helpers
//!
//! # Configuration (tplpass.toml)
//!
//! ```toml
//! entry = ["pages/*.tera", "emails/**/*.tera"]
//! output = "dist/[name].html"
//! data = "data/*.json"
//! partials = "partials"
//! output_dir = "dist"
//! verbose = true
//!
//! [pages]
//! enabled = false
//! prefix = "html"
//! ```
//!
//! # Embedding
//!
//! ```rust,no_run
//! use tplpass::config::Options;
//! use tplpass::host::FsHost;
//! use tplpass::pipeline::Pipeline;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = Options::new("/project", ["pages/*.tera"]);
//! let mut pipeline = Pipeline::new(options)?;
//! let mut host = FsHost::new("/project/dist");
//! let report = host.run_pass(&mut pipeline).await?;
//! println!("{} assets written", report.written.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod core;
pub mod hooks;
pub mod host;
pub mod output;
pub mod pattern;
pub mod pipeline;
pub mod templating;
pub mod tracking;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
