//! `shoplist config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Show the path to the configuration file
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let mut config = Config::load();

    // Fill in effective values so the output shows what a command would use
    config.db_path = Some(global.db.clone().unwrap_or_else(|| config.db_path()));
    config.currency_symbol = Some(config.currency_symbol().to_string());
    config.date_format = Some(config.date_format().to_string());

    if global.in_memory {
        config.db_path = None;
    }

    print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
    Ok(())
}

fn run_path() -> Result<()> {
    match Config::global_config_path() {
        Some(path) => {
            let marker = if path.exists() {
                style("(exists)").green()
            } else {
                style("(not created)").dim()
            };
            println!("{} {}", path.display(), marker);
        }
        None => println!("{}", style("no configuration directory on this platform").yellow()),
    }
    Ok(())
}
