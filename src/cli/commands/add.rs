//! `shoplist add` command - Add an item to the list

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_money, format_short_id, parse_date};
use crate::cli::session::with_controller;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::SaveOutcome;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item name (required, must not be blank)
    pub name: String,

    /// Price per unit (unparsable values count as 0)
    #[arg(long, short = 'p', default_value = "")]
    pub price: String,

    /// Quantity (unparsable values count as 1)
    #[arg(long = "quantity", short = 'n', default_value = "1")]
    pub quantity: String,

    /// Department (e.g. Dairy, Produce)
    #[arg(long, short = 'd', default_value = "")]
    pub department: String,

    /// Stock keeping unit
    #[arg(long, default_value = "")]
    pub sku: String,

    /// Best-by date (format from config, default MM/DD/YYYY)
    #[arg(long, short = 'b')]
    pub best_by: Option<String>,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let best_by = match args.best_by.as_deref() {
            Some(text) => parse_date(text, config.date_format())?,
            None => None,
        };

        controller.begin_new();
        let draft = controller
            .draft()
            .clone()
            .with_name(args.name)
            .with_price(args.price)
            .with_quantity(args.quantity)
            .with_department(args.department)
            .with_sku(args.sku)
            .with_best_by(best_by);
        controller.set_draft(draft);

        match controller.add()? {
            SaveOutcome::Saved(item) => {
                match global.format {
                    OutputFormat::Id => println!("{}", item.id),
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&item).into_diagnostic()?);
                    }
                    _ if global.quiet => {}
                    _ => {
                        println!(
                            "{} Added {} {}",
                            style("✓").green(),
                            style(format_short_id(&item.id)).cyan(),
                            style(&item.name).yellow()
                        );
                        println!(
                            "   Total: {}",
                            style(format_money(controller.total(), config.currency_symbol())).bold()
                        );
                    }
                }
            }
            SaveOutcome::Skipped(reason) => {
                eprintln!("{} Nothing added: {}", style("!").yellow(), reason);
            }
        }

        Ok(())
    })
}
