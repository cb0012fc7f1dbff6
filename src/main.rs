//! `tplpass` entry point: parse arguments, run the command, and report
//! failures through [`user_friendly_error`] with exit status 1.

use anyhow::Result;
use clap::Parser;
use tplpass::cli;
use tplpass::constants::NO_COLOR_ENV;
use tplpass::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if std::env::var_os(NO_COLOR_ENV).is_some() {
        colored::control::set_override(false);
    }

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
