//! `shoplist total` command - Print the total cost

use miette::Result;
use serde_json::json;

use crate::cli::helpers::format_money;
use crate::cli::session::with_controller;
use crate::cli::{GlobalOpts, OutputFormat};

pub fn run(global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let view = controller.refresh().clone();

        match global.format {
            OutputFormat::Json => {
                println!("{}", json!({ "items": view.items.len(), "total": view.total }));
            }
            OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Id => {
                println!("{:.2}", view.total);
            }
            _ => println!("{}", format_money(view.total, config.currency_symbol())),
        }

        Ok(())
    })
}
