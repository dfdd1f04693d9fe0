//! `shoplist show` command - Show a single item

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_date, format_money, resolve_item};
use crate::cli::session::with_controller;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item ID or unique ID prefix
    pub id: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let item = resolve_item(controller, &args.id)?;

        match global.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&item).into_diagnostic()?);
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yml::to_string(&item).into_diagnostic()?);
            }
            OutputFormat::Id => println!("{}", item.id),
            _ => {
                let symbol = config.currency_symbol();
                println!("{}", style("─".repeat(60)).dim());
                println!("{}: {}", style("ID").bold(), style(&item.id).cyan());
                println!("{}: {}", style("Name").bold(), style(&item.name).yellow());
                println!("{}: {}", style("Price").bold(), format_money(item.price, symbol));
                println!("{}: {}", style("Quantity").bold(), item.quantity);
                if !item.department.is_empty() {
                    println!("{}: {}", style("Department").bold(), item.department);
                }
                if !item.sku.is_empty() {
                    println!("{}: {}", style("SKU").bold(), item.sku);
                }
                if item.best_by.is_some() {
                    println!(
                        "{}: {}",
                        style("Best By").bold(),
                        format_date(item.best_by, config.date_format())
                    );
                }
                println!("{}", style("─".repeat(60)).dim());
                println!(
                    "{}: {}",
                    style("Line Total").bold(),
                    style(format_money(item.line_total(), symbol)).bold()
                );
            }
        }

        Ok(())
    })
}
