//! Repository: the only path from application logic to storage
//!
//! Pure pass-through. Swapping storage technology means implementing
//! [`ItemStore`] and handing it to [`StoreRepository`]; nothing above this
//! layer changes.

use crate::core::identity::ItemId;
use crate::core::item::Item;
use crate::core::store::{ItemStore, LiveQuery, StoreError};

/// Data operations available to the controller
pub trait ShoppingRepository {
    /// Live view of every item, newest first
    fn all_items(&self) -> Result<LiveQuery, StoreError>;

    fn item_by_id(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;

    fn insert_item(&self, item: &Item) -> Result<(), StoreError>;

    fn update_item(&self, item: &Item) -> Result<(), StoreError>;

    fn delete_item(&self, item: &Item) -> Result<(), StoreError>;
}

/// Repository over a borrowed, long-lived store
pub struct StoreRepository<'s, S: ItemStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: ItemStore + ?Sized> StoreRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }
}

impl<S: ItemStore + ?Sized> ShoppingRepository for StoreRepository<'_, S> {
    fn all_items(&self) -> Result<LiveQuery, StoreError> {
        self.store.observe_all()
    }

    fn item_by_id(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        self.store.get_by_id(id)
    }

    fn insert_item(&self, item: &Item) -> Result<(), StoreError> {
        self.store.insert(item)
    }

    fn update_item(&self, item: &Item) -> Result<(), StoreError> {
        self.store.update(item)
    }

    fn delete_item(&self, item: &Item) -> Result<(), StoreError> {
        self.store.delete(item)
    }
}
