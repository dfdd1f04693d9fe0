//! `shoplist edit` command - Edit an existing item
//!
//! Loads the item into the draft, applies the given fields, and saves it as a
//! full replacement. Fields that are not given keep their stored value.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{format_short_id, parse_date, resolve_item};
use crate::cli::session::with_controller;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::SaveOutcome;

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Item ID or unique ID prefix
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New price per unit
    #[arg(long, short = 'p')]
    pub price: Option<String>,

    /// New quantity
    #[arg(long = "quantity", short = 'n')]
    pub quantity: Option<String>,

    /// New department
    #[arg(long, short = 'd')]
    pub department: Option<String>,

    /// New stock keeping unit
    #[arg(long)]
    pub sku: Option<String>,

    /// New best-by date
    #[arg(long, short = 'b', conflicts_with = "clear_best_by")]
    pub best_by: Option<String>,

    /// Remove the best-by date
    #[arg(long)]
    pub clear_best_by: bool,
}

pub fn run(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let item = resolve_item(controller, &args.id)?;
        controller.setup_edit(&item);

        let mut draft = controller.draft().clone();
        if let Some(name) = args.name {
            draft = draft.with_name(name);
        }
        if let Some(price) = args.price {
            draft = draft.with_price(price);
        }
        if let Some(quantity) = args.quantity {
            draft = draft.with_quantity(quantity);
        }
        if let Some(department) = args.department {
            draft = draft.with_department(department);
        }
        if let Some(sku) = args.sku {
            draft = draft.with_sku(sku);
        }
        if let Some(text) = args.best_by.as_deref() {
            draft = draft.with_best_by(parse_date(text, config.date_format())?);
        }
        if args.clear_best_by {
            draft = draft.with_best_by(None);
        }
        controller.set_draft(draft);

        match controller.update()? {
            SaveOutcome::Saved(updated) => match global.format {
                OutputFormat::Id => println!("{}", updated.id),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&updated).into_diagnostic()?);
                }
                _ if global.quiet => {}
                _ => {
                    println!(
                        "{} Updated {} {}",
                        style("✓").green(),
                        style(format_short_id(&updated.id)).cyan(),
                        style(&updated.name).yellow()
                    );
                }
            },
            SaveOutcome::Skipped(reason) => {
                controller.clear_form();
                eprintln!("{} Nothing updated: {}", style("!").yellow(), reason);
            }
        }

        Ok(())
    })
}
