//! Run one template pass for a project.
//!
//! The project is described by `tplpass.toml`; its directory is the base for
//! every relative pattern and path in it. Assets emitted under `output_dir`
//! are written there; targets outside it were already written directly
//! during the pass.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::compiler::CompiledFile;
use crate::config::{Config, Options};
use crate::constants::CONFIG_FILE_NAME;
use crate::host::FsHost;
use crate::output::Routed;
use crate::pipeline::{PassOutcome, Pipeline};

#[derive(Args, Debug, Default)]
pub struct BuildCommand {
    /// Override `output_dir` from the config file
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl BuildCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config_path = match &cli.config_path {
            Some(path) => path.clone(),
            None => PathBuf::from(CONFIG_FILE_NAME),
        };
        let config_path = std::path::absolute(&config_path)
            .with_context(|| format!("Failed to resolve config path {}", config_path.display()))?;
        let base_dir = config_path.parent().map(Path::to_path_buf).unwrap_or_default();

        let config = Config::load(&config_path).await?;
        let output_root = match self.output_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => std::env::current_dir()?.join(dir),
            None => config.output_root(&base_dir),
        };

        let options = Options::from_config(&config, &base_dir).verbose(config.verbose || cli.verbose);
        let mut pipeline = Pipeline::new(options)?;
        let mut host = FsHost::new(&output_root);

        let report = host.run_pass(&mut pipeline).await?;

        if !cli.quiet {
            print_summary(&report.outcome, report.written.len(), &output_root);
        }
        Ok(())
    }
}

fn print_summary(outcome: &PassOutcome, written: usize, output_root: &Path) {
    match outcome {
        PassOutcome::Skipped => println!("{}", "Nothing changed, templates are up to date".yellow()),
        PassOutcome::Compiled { files } => {
            let direct = files.iter().filter(|f| matches!(f.routed, Routed::Written(_))).count();
            println!("{}", "Build complete!".green().bold());
            println!("  {} template(s) compiled", files.len());
            println!("  {} asset(s) written to {}", written, output_root.display());
            if direct > 0 {
                println!("  {} file(s) written outside the output directory", direct);
                for CompiledFile { target, .. } in files.iter().filter(|f| matches!(f.routed, Routed::Written(_))) {
                    println!("    {}", target.display());
                }
            }
        }
    }
}
