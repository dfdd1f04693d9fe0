//! `shoplist completions` command - Shell completion scripts
//!
//! ```bash
//! source <(shoplist completions bash)
//! shoplist completions fish -o ~/.config/fish/completions/shoplist.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }
            let mut file = File::create(&path).into_diagnostic()?;
            generate(args.shell, &mut cmd, bin_name, &mut file);
            file.flush().into_diagnostic()?;
            eprintln!(
                "{} Wrote {} completions to {}",
                style("✓").green(),
                args.shell,
                style(path.display()).cyan()
            );
        }
        None => generate(args.shell, &mut cmd, bin_name, &mut io::stdout()),
    }
    Ok(())
}
