//! Shared helper functions for CLI commands
//!
//! Formatting, date input and item lookup used across command modules.

use chrono::{DateTime, NaiveDate, Utc};
use miette::Result;

use crate::cli::session::CliController;
use crate::core::{Item, ItemId};

/// Format an ItemId for display, truncating if too long
///
/// IDs are 31 characters; tables show the first 13 with a "..." suffix,
/// which is still a usable prefix for `edit`/`rm`/`show`.
pub fn format_short_id(id: &ItemId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a money amount with two decimals
pub fn format_money(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Format an optional best-by date, blank when absent
pub fn format_date(date: Option<DateTime<Utc>>, format: &str) -> String {
    date.map(|d| d.format(format).to_string()).unwrap_or_default()
}

/// Parse best-by input; blank means "no date"
pub fn parse_date(text: &str, format: &str) -> Result<Option<DateTime<Utc>>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(text, format).map_err(|e| {
        miette::miette!(
            help = format!("expected format {}", format),
            "invalid best-by date '{}': {}",
            text,
            e
        )
    })?;

    Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
}

/// Resolve a full ID or a unique ID prefix to a stored item
///
/// Prefix matching ignores case and accepts the ULID part with or without
/// the `ITEM-` prefix.
pub fn resolve_item(controller: &mut CliController<'_>, query: &str) -> Result<Item> {
    let query = query.trim().trim_end_matches("...");

    if let Ok(id) = ItemId::parse(query) {
        return controller
            .find(&id)?
            .ok_or_else(|| miette::miette!("No item found with ID '{}'", id));
    }

    let needle = query.to_ascii_uppercase();
    let items = controller.items();
    let matches: Vec<&Item> = items
        .iter()
        .filter(|item| {
            let full = item.id.to_string();
            full.starts_with(&needle) || item.id.ulid().to_string().starts_with(&needle)
        })
        .collect();

    match matches.as_slice() {
        [] => Err(miette::miette!("No item found matching '{}'", query)),
        [item] => Ok((*item).clone()),
        many => Err(miette::miette!(
            help = "use more characters of the ID",
            "'{}' matches {} items",
            query,
            many.len()
        )),
    }
}
