//! `shoplist list` command - List items with the total cost

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_date, format_money, format_short_id, truncate_str};
use crate::cli::session::with_controller;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{total_cost, Config, Item};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show items in this department (case-insensitive)
    #[arg(long, short = 'd')]
    pub department: Option<String>,

    /// Search in name and SKU (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    items: &'a [Item],
    total: f64,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    with_controller(global, |controller, config| {
        let snapshot = controller.items();
        let mut items: Vec<Item> = snapshot
            .iter()
            .filter(|item| matches_filters(item, &args))
            .cloned()
            .collect();
        if let Some(limit) = args.limit {
            items.truncate(limit);
        }

        if args.count {
            println!("{}", items.len());
            return Ok(());
        }

        let total = total_cost(&items);
        let format = resolve_format(global.format, config);
        match format {
            OutputFormat::Json => {
                let output = ListOutput {
                    items: &items,
                    total,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            }
            OutputFormat::Yaml => {
                let output = ListOutput {
                    items: &items,
                    total,
                };
                print!("{}", serde_yml::to_string(&output).into_diagnostic()?);
            }
            OutputFormat::Csv => write_csv(&items, config)?,
            OutputFormat::Tsv => {
                println!("id\tname\tprice\tquantity\tdepartment\tsku\tbest_by\tline_total");
                for item in &items {
                    let row = table_row(item, config, false);
                    println!("{}", row.join("\t"));
                }
            }
            OutputFormat::Id => {
                for item in &items {
                    println!("{}", item.id);
                }
            }
            OutputFormat::Md | OutputFormat::Auto => {
                if items.is_empty() {
                    if !global.quiet {
                        println!("No items on the list.");
                    }
                    return Ok(());
                }

                let mut table = Builder::default();
                table.push_record(["ID", "Name", "Price", "Qty", "Department", "SKU", "Best By", "Total"]);
                for item in &items {
                    table.push_record(table_row(item, config, true));
                }
                let style_md = format == OutputFormat::Md;
                let rendered = if style_md {
                    table.build().with(Style::markdown()).to_string()
                } else {
                    table.build().with(Style::rounded()).to_string()
                };
                println!("{}", rendered);

                if !global.quiet {
                    println!();
                    println!(
                        "{} item(s), total {}",
                        style(items.len()).cyan(),
                        style(format_money(total, config.currency_symbol())).bold()
                    );
                }
            }
        }

        Ok(())
    })
}

/// Global `--format` wins; `auto` defers to the configured default
fn resolve_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }
    match config.default_format.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("yaml") => OutputFormat::Yaml,
        Some("tsv") => OutputFormat::Tsv,
        Some("json") => OutputFormat::Json,
        Some("csv") => OutputFormat::Csv,
        Some("md") => OutputFormat::Md,
        Some("id") => OutputFormat::Id,
        _ => OutputFormat::Auto,
    }
}

fn matches_filters(item: &Item, args: &ListArgs) -> bool {
    if let Some(ref dept) = args.department {
        if !item.department.eq_ignore_ascii_case(dept) {
            return false;
        }
    }
    if let Some(ref search) = args.search {
        let needle = search.to_lowercase();
        if !item.name.to_lowercase().contains(&needle) && !item.sku.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

fn table_row(item: &Item, config: &Config, for_display: bool) -> Vec<String> {
    let symbol = if for_display { config.currency_symbol() } else { "" };
    vec![
        if for_display {
            format_short_id(&item.id)
        } else {
            item.id.to_string()
        },
        if for_display {
            truncate_str(&item.name, 32)
        } else {
            item.name.clone()
        },
        format_money(item.price, symbol),
        item.quantity.to_string(),
        item.department.clone(),
        item.sku.clone(),
        format_date(item.best_by, config.date_format()),
        format_money(item.line_total(), symbol),
    ]
}

fn write_csv(items: &[Item], config: &Config) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer
        .write_record(["id", "name", "price", "quantity", "department", "sku", "best_by", "line_total"])
        .into_diagnostic()?;
    for item in items {
        writer
            .write_record(table_row(item, config, false))
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            department: None,
            search: None,
            limit: None,
            count: false,
        }
    }

    #[test]
    fn test_department_filter_ignores_case() {
        let milk = Item::new("Milk", 3.5, 2, "Dairy", "111", None);
        let filter = ListArgs {
            department: Some("dairy".to_string()),
            ..args()
        };
        assert!(matches_filters(&milk, &filter));

        let bread = Item::new("Bread", 2.0, 1, "Bakery", "", None);
        assert!(!matches_filters(&bread, &filter));
    }

    #[test]
    fn test_search_matches_name_or_sku() {
        let milk = Item::new("Oat Milk", 3.5, 2, "Dairy", "OAT-1", None);
        for needle in ["milk", "oat-1"] {
            let filter = ListArgs {
                search: Some(needle.to_string()),
                ..args()
            };
            assert!(matches_filters(&milk, &filter));
        }
    }

    #[test]
    fn test_pipe_row_has_raw_values() {
        let milk = Item::new("Milk", 3.5, 2, "Dairy", "111", None);
        let row = table_row(&milk, &Config::default(), false);
        assert_eq!(row[0], milk.id.to_string());
        assert_eq!(row[2], "3.50");
        assert_eq!(row[6], "");
        assert_eq!(row[7], "7.00");
    }

    #[test]
    fn test_configured_default_format() {
        let config = Config {
            default_format: Some("JSON".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Tsv, &config), OutputFormat::Tsv);
        assert_eq!(resolve_format(OutputFormat::Auto, &Config::default()), OutputFormat::Auto);
    }
}
