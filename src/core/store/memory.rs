//! In-memory item store
//!
//! Same contract as [`SqliteStore`](super::SqliteStore) without a database.
//! Used as the test fake and for `--in-memory` sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{newest_first, ItemStore, LiveQuery, Snapshot, StoreError};
use crate::core::identity::ItemId;
use crate::core::item::Item;
use crate::core::live::Publisher;

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<ItemId, Item>>,
    live: Publisher<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, HashMap<ItemId, Item>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn snapshot(rows: &HashMap<ItemId, Item>) -> Snapshot {
        let mut items: Vec<Item> = rows.values().cloned().collect();
        items.sort_by(newest_first);
        Arc::from(items)
    }

    // Publishing under the row lock keeps emissions in mutation order
    fn notify(&self, rows: &HashMap<ItemId, Item>) {
        if self.live.has_subscribers() {
            self.live.publish(Self::snapshot(rows));
        }
    }
}

impl ItemStore for MemoryStore {
    fn insert(&self, item: &Item) -> Result<(), StoreError> {
        let mut rows = self.rows();
        if rows.contains_key(&item.id) {
            return Err(StoreError::ConstraintViolation {
                id: item.id.to_string(),
            });
        }
        rows.insert(item.id.clone(), item.clone());
        self.notify(&rows);
        Ok(())
    }

    fn update(&self, item: &Item) -> Result<(), StoreError> {
        let mut rows = self.rows();
        match rows.get_mut(&item.id) {
            Some(row) => *row = item.clone(),
            None => return Ok(()),
        }
        self.notify(&rows);
        Ok(())
    }

    fn delete(&self, item: &Item) -> Result<(), StoreError> {
        let mut rows = self.rows();
        if rows.remove(&item.id).is_some() {
            self.notify(&rows);
        }
        Ok(())
    }

    fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.rows().get(id).cloned())
    }

    fn observe_all(&self) -> Result<LiveQuery, StoreError> {
        let rows = self.rows();
        Ok(self.live.subscribe(Self::snapshot(&rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_tracks_rows() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let milk = Item::new("Milk", 3.5, 2, "Dairy", "111", None);
        store.insert(&milk).unwrap();
        assert_eq!(store.len(), 1);

        store.delete(&milk).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_equal_timestamps_order_is_stable() {
        let store = MemoryStore::new();
        let mut items: Vec<Item> = (0..5)
            .map(|n| Item::new(format!("item {}", n), 1.0, 1, "", "", None))
            .collect();
        for item in &mut items {
            item.created_at = 42;
            store.insert(item).unwrap();
        }

        let first = store.observe_all().unwrap();
        let second = store.observe_all().unwrap();
        let ids = |q: &LiveQuery| q.current().iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert!(ids(&first).windows(2).all(|w| w[0] > w[1]));
    }
}
