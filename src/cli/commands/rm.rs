//! `shoplist rm` command - Remove an item

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_money, format_short_id, resolve_item};
use crate::cli::session::with_controller;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Item ID or unique ID prefix
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let item = resolve_item(controller, &args.id)?;

        if !args.yes {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Remove {} ({})?", item.name, format_short_id(&item.id)))
                .default(false)
                .interact()
                .into_diagnostic()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        controller.delete(&item)?;

        if !global.quiet {
            println!(
                "{} Removed {} {}",
                style("✓").green(),
                style(format_short_id(&item.id)).cyan(),
                style(&item.name).yellow()
            );
            println!(
                "   Total: {}",
                style(format_money(controller.total(), config.currency_symbol())).bold()
            );
        }

        Ok(())
    })
}
