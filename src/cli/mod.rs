//! Command-line interface for `tplpass`.
//!
//! # Commands
//!
//! - `build` - run one template pass for the project described by
//!   `tplpass.toml`
//!
//! # Global Options
//!
//! - `--verbose` - debug logging and per-file output lines
//! - `--quiet` - only errors
//! - `--config <path>` - config file to use instead of `./tplpass.toml`
//!
//! `RUST_LOG`, when set, overrides the level chosen by the flags.
//!
//! # Example
//!
//! ```bash
//! tplpass build
//! tplpass --verbose --config site/tplpass.toml build
//! ```

mod build;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use build::BuildCommand;

#[derive(Parser, Debug)]
#[command(
    name = "tplpass",
    about = "Incremental template compilation",
    version,
    long_about = "Renders Tera templates against JSON data and partials, recompiling only when a tracked dependency changed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging, one line per rendered file)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file (defaults to ./tplpass.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one template pass and write the output
    Build(BuildCommand),
}

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: &'static str,
    pub verbose: bool,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber. Safe to call more than once.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

impl Cli {
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level,
            verbose: self.verbose,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();

        match self.command {
            Commands::Build(cmd) => cmd.execute(&config).await,
        }
    }
}
