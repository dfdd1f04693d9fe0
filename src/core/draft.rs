//! Draft record for the add/edit form
//!
//! The draft keeps user input as text. Text is parsed only when saving, and
//! unparsable numbers fall back to defaults instead of being rejected.

use chrono::{DateTime, Utc};

use crate::core::identity::ItemId;
use crate::core::item::Item;

/// Quantity text shown in a fresh form
pub const DEFAULT_QUANTITY_TEXT: &str = "1";

/// In-progress, unsaved form values
///
/// Replaced as a whole by the controller; the `with_*` builders produce a
/// modified copy that keeps the editing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub department: String,
    pub sku: String,
    pub best_by: Option<DateTime<Utc>>,
    is_editing: bool,
    current_id: Option<ItemId>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            quantity: DEFAULT_QUANTITY_TEXT.to_string(),
            department: String::new(),
            sku: String::new(),
            best_by: None,
            is_editing: false,
            current_id: None,
        }
    }
}

impl Draft {
    /// Empty draft for a new item, with the editor open
    pub fn new_item() -> Self {
        Self {
            is_editing: true,
            ..Self::default()
        }
    }

    /// Draft pre-filled from a stored item, editing that item
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: format_price(item.price),
            quantity: format_quantity(item.quantity),
            department: item.department.clone(),
            sku: item.sku.clone(),
            best_by: item.best_by,
            is_editing: true,
            current_id: Some(item.id.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// ID of the item under edit; `None` for a new item
    pub fn current_id(&self) -> Option<&ItemId> {
        self.current_id.as_ref()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_best_by(mut self, best_by: Option<DateTime<Utc>>) -> Self {
        self.best_by = best_by;
        self
    }

    /// True when the name is empty after trimming
    pub fn name_is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// True when the price text is empty after trimming
    pub fn price_is_blank(&self) -> bool {
        self.price.trim().is_empty()
    }

    /// Price parsed with the 0.0 default
    pub fn parsed_price(&self) -> f64 {
        parse_price(&self.price)
    }

    /// Quantity parsed with the 1 default
    pub fn parsed_quantity(&self) -> u32 {
        parse_quantity(&self.quantity)
    }
}

/// Parse price text; anything that is not a finite, non-negative number is 0.0
pub fn parse_price(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        // -0.0 normalises to 0.0 so it formats as "0"
        Ok(value) if value.is_finite() && value >= 0.0 => value + 0.0,
        _ => 0.0,
    }
}

/// Parse quantity text; anything that is not a non-negative integer is 1
pub fn parse_quantity(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(1)
}

/// Canonical price text: shortest form that parses back to the same value
pub fn format_price(price: f64) -> String {
    price.to_string()
}

/// Canonical quantity text
pub fn format_quantity(quantity: u32) -> String {
    quantity.to_string()
}
