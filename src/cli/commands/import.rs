//! `shoplist import` command - Bulk add items from CSV
//!
//! Every row goes through the normal add flow, so the same defaults apply:
//! unparsable prices become 0, unparsable quantities become 1, and rows with
//! a blank name are skipped.
//!
//! Recognised columns (header names are case-insensitive, order is free):
//! `name`, `price`, `quantity`, `department`, `sku`, `best_by`.

use console::style;
use csv::{ReaderBuilder, StringRecord};
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::cli::helpers::{format_money, parse_date};
use crate::cli::session::with_controller;
use crate::cli::GlobalOpts;
use crate::core::{Draft, SaveOutcome};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,

    /// Validate rows without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep going after a row with an invalid best-by date
    #[arg(long)]
    pub skip_errors: bool,
}

/// Row counts for an import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_processed: usize,
    pub added: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let file = File::open(&args.file).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);
    if !header_map.contains_key("name") {
        return Err(miette::miette!(
            help = "the first row must name the columns, e.g. name,price,quantity",
            "CSV file has no 'name' column"
        ));
    }

    with_controller(global, |controller, config| {
        let mut stats = ImportStats::default();

        for (row_idx, result) in rdr.records().enumerate() {
            let row_num = row_idx + 2; // +2 for 1-indexed and header row
            stats.rows_processed += 1;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{} Row {}: CSV parse error: {}", style("✗").red(), row_num, e);
                    stats.errors += 1;
                    if !args.skip_errors {
                        return Err(miette::miette!("CSV parse error at row {}: {}", row_num, e));
                    }
                    continue;
                }
            };

            let best_by_text = get_field(&record, &header_map, "best_by").unwrap_or_default();
            let best_by = match parse_date(&best_by_text, config.date_format()) {
                Ok(date) => date,
                Err(e) => {
                    eprintln!("{} Row {}: {}", style("✗").red(), row_num, e);
                    stats.errors += 1;
                    if !args.skip_errors {
                        return Err(e);
                    }
                    continue;
                }
            };

            let draft = Draft::new_item()
                .with_name(get_field(&record, &header_map, "name").unwrap_or_default())
                .with_price(get_field(&record, &header_map, "price").unwrap_or_default())
                .with_quantity(
                    get_field(&record, &header_map, "quantity").unwrap_or_else(|| "1".to_string()),
                )
                .with_department(get_field(&record, &header_map, "department").unwrap_or_default())
                .with_sku(get_field(&record, &header_map, "sku").unwrap_or_default())
                .with_best_by(best_by);

            if args.dry_run {
                if draft.name_is_blank() {
                    stats.skipped += 1;
                } else {
                    stats.added += 1;
                }
                continue;
            }

            controller.set_draft(draft);
            match controller.add()? {
                SaveOutcome::Saved(_) => stats.added += 1,
                SaveOutcome::Skipped(reason) => {
                    if !global.quiet {
                        eprintln!("{} Row {}: skipped, {}", style("!").yellow(), row_num, reason);
                    }
                    controller.clear_form();
                    stats.skipped += 1;
                }
            }
        }

        let verb = if args.dry_run { "Would add" } else { "Added" };
        println!(
            "{} {} {} item(s) from {} row(s)",
            style("✓").green(),
            verb,
            style(stats.added).cyan(),
            stats.rows_processed
        );
        if stats.skipped > 0 {
            println!("   Skipped: {}", style(stats.skipped).yellow());
        }
        if stats.errors > 0 {
            println!("   Errors:  {}", style(stats.errors).red());
        }
        if !args.dry_run && !global.quiet {
            println!(
                "   Total:   {}",
                style(format_money(controller.total(), config.currency_symbol())).bold()
            );
        }

        Ok(())
    })
}

/// Map lowercased header names to column positions
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().replace([' ', '-'], "_"), i))
        .collect()
}

/// Get a field by header name
fn get_field(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<String> {
    header_map
        .get(name)
        .and_then(|&i| record.get(i))
        .map(|s| s.to_string())
}
