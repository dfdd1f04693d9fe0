//! Shopping item record and its storage conversions

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::ItemId;

/// One line on the shopping list
///
/// Rows are only ever replaced wholesale; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key, assigned at creation
    pub id: ItemId,

    /// Product name (never blank once persisted)
    pub name: String,

    /// Price per unit
    pub price: f64,

    /// Number of units to buy
    pub quantity: u32,

    /// Store department, free-form
    #[serde(default)]
    pub department: String,

    /// Stock keeping unit, free-form
    #[serde(default)]
    pub sku: String,

    /// Optional best-by date; `None` means no expiry is tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_by: Option<DateTime<Utc>>,

    /// Creation time in epoch milliseconds, used only for ordering
    pub created_at: i64,
}

impl Item {
    /// Create a new item with a fresh ID and creation timestamp
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        department: impl Into<String>,
        sku: impl Into<String>,
        best_by: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            quantity,
            department: department.into(),
            sku: sku.into(),
            best_by,
            created_at: next_created_at(),
        }
    }

    /// Cost of this line (price times quantity)
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Sum of `price * quantity` over a list of items
pub fn total_cost(items: &[Item]) -> f64 {
    items.iter().map(Item::line_total).sum()
}

static LAST_CREATED_AT: AtomicI64 = AtomicI64::new(0);

/// Wall-clock millis, clamped so successive calls in one process strictly increase
pub fn next_created_at() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST_CREATED_AT.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_CREATED_AT.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// Convert a best-by date to its stored form (absent stays NULL, never zero)
pub fn date_to_millis(date: Option<DateTime<Utc>>) -> Option<i64> {
    date.map(|d| d.timestamp_millis())
}

/// Convert a stored best-by value back to a date
///
/// Returns `Err(millis)` when the value is outside chrono's representable range.
pub fn millis_to_date(millis: Option<i64>) -> Result<Option<DateTime<Utc>>, i64> {
    match millis {
        None => Ok(None),
        Some(ms) => DateTime::from_timestamp_millis(ms).map(Some).ok_or(ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(price: f64, quantity: u32) -> Item {
        Item::new("Milk", price, quantity, "Dairy", "111", None)
    }

    #[test]
    fn test_new_item_has_fresh_identity() {
        let a = item(1.0, 1);
        let b = item(1.0, 1);
        assert_ne!(a.id, b.id);
        assert!(b.created_at > a.created_at);
    }

    #[test]
    fn test_created_at_strictly_increases() {
        let stamps: Vec<i64> = (0..100).map(|_| next_created_at()).collect();
        assert!(stamps.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_line_total_and_total_cost() {
        let items = vec![item(3.5, 2), item(1.25, 4), item(0.0, 9)];
        assert_eq!(items[0].line_total(), 7.0);
        assert_eq!(total_cost(&items), 12.0);
        assert_eq!(total_cost(&[]), 0.0);
    }

    #[test]
    fn test_absent_date_maps_to_null_not_zero() {
        assert_eq!(date_to_millis(None), None);
        assert_eq!(millis_to_date(None), Ok(None));

        let epoch = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(date_to_millis(Some(epoch)), Some(0));
        assert_eq!(millis_to_date(Some(0)), Ok(Some(epoch)));
    }

    #[test]
    fn test_date_conversion_is_invertible() {
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap();
        let stored = date_to_millis(Some(date));
        assert_eq!(millis_to_date(stored), Ok(Some(date)));
    }

    #[test]
    fn test_out_of_range_millis_rejected() {
        assert_eq!(millis_to_date(Some(i64::MAX)), Err(i64::MAX));
    }

    #[test]
    fn test_item_serializes_id_as_text() {
        let milk = item(3.5, 2);
        let json = serde_json::to_value(&milk).unwrap();
        assert_eq!(json["id"], milk.id.to_string());
        assert!(json.get("best_by").is_none());

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, milk);
    }
}
