//! View-state controller for the shopping list
//!
//! Owns the draft form and the subscription to the repository's live list.
//! Every storage-touching operation returns `Result` so faults reach the
//! presentation layer. Blank required fields are not errors: the operation is
//! skipped and the outcome says why.
//!
//! The `is_editing` flag on the draft is the only state machine:
//! `idle -> editing` on [`begin_new`](ShoppingController::begin_new) or
//! [`setup_edit`](ShoppingController::setup_edit), `editing -> idle` on
//! [`clear_form`](ShoppingController::clear_form), which every successful save
//! and every cancel goes through.

use std::fmt;
use std::sync::Arc;

use crate::core::draft::Draft;
use crate::core::identity::ItemId;
use crate::core::item::{next_created_at, total_cost, Item};
use crate::core::live::{Publisher, Subscription};
use crate::core::repository::ShoppingRepository;
use crate::core::store::{LiveQuery, Snapshot, StoreError};

/// Derived state published to the presentation layer
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Every item, newest first
    pub items: Snapshot,
    /// Sum of `price * quantity` over `items`
    pub total: f64,
}

impl ViewState {
    fn from_snapshot(items: Snapshot) -> Self {
        let total = total_cost(&items);
        Self { items, total }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            total: 0.0,
        }
    }
}

/// Why a save did not reach storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name is empty after trimming
    BlankName,
    /// Price text is empty (update only)
    BlankPrice,
    /// `update` was called without `setup_edit`
    NotEditing,
    /// The item under edit no longer exists
    Missing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankName => write!(f, "name is blank"),
            SkipReason::BlankPrice => write!(f, "price is blank"),
            SkipReason::NotEditing => write!(f, "no item is being edited"),
            SkipReason::Missing => write!(f, "item no longer exists"),
        }
    }
}

/// Result of `add`, `update` or `save`
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The item as written to storage
    Saved(Item),
    /// Nothing was written
    Skipped(SkipReason),
}

impl SaveOutcome {
    pub fn saved(&self) -> Option<&Item> {
        match self {
            SaveOutcome::Saved(item) => Some(item),
            SaveOutcome::Skipped(_) => None,
        }
    }
}

/// Form state plus the live list and total
pub struct ShoppingController<R: ShoppingRepository> {
    repository: R,
    live: LiveQuery,
    draft: Draft,
    view: ViewState,
    views: Publisher<ViewState>,
}

impl<R: ShoppingRepository> ShoppingController<R> {
    /// Subscribe to the repository and derive the initial view
    pub fn new(repository: R) -> Result<Self, StoreError> {
        let live = repository.all_items()?;
        let view = ViewState::from_snapshot(live.current().clone());
        Ok(Self {
            repository,
            live,
            draft: Draft::default(),
            view,
            views: Publisher::new(),
        })
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Pull pending emissions; recompute and republish if the list changed
    pub fn refresh(&mut self) -> &ViewState {
        if self.live.poll() {
            self.view = ViewState::from_snapshot(self.live.current().clone());
            tracing::trace!(
                items = self.view.items.len(),
                total = self.view.total,
                "view state recomputed"
            );
            self.views.publish(self.view.clone());
        }
        &self.view
    }

    /// Latest items, newest first
    pub fn items(&mut self) -> Snapshot {
        self.refresh().items.clone()
    }

    /// Latest total cost
    pub fn total(&mut self) -> f64 {
        self.refresh().total
    }

    /// Subscribe to derived state; starts with the last computed value
    ///
    /// New values are published only from [`refresh`](Self::refresh) (and the
    /// accessors that call it). Writes made through another controller or
    /// straight to the store reach subscribers once the owner of this
    /// controller calls `refresh` again.
    pub fn subscribe(&mut self) -> Subscription<ViewState> {
        self.refresh();
        self.views.subscribe(self.view.clone())
    }

    /// Point lookup through the repository (never cached)
    pub fn find(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        self.repository.item_by_id(id)
    }

    // =========================================================================
    // Draft
    // =========================================================================

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the whole draft
    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    /// Open the editor for a new item
    pub fn begin_new(&mut self) {
        self.draft = Draft::new_item();
    }

    /// Load `item` into the draft for editing
    pub fn setup_edit(&mut self, item: &Item) {
        self.draft = Draft::from_item(item);
    }

    /// Reset every field and leave editing mode
    pub fn clear_form(&mut self) {
        self.draft = Draft::default();
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a new item built from the draft
    pub fn add(&mut self) -> Result<SaveOutcome, StoreError> {
        if self.draft.name_is_blank() {
            return Ok(self.skip(SkipReason::BlankName));
        }

        let item = Item {
            id: ItemId::new(),
            name: self.draft.name.clone(),
            price: self.draft.parsed_price(),
            quantity: self.draft.parsed_quantity(),
            department: self.draft.department.clone(),
            sku: self.draft.sku.clone(),
            best_by: self.draft.best_by,
            created_at: next_created_at(),
        };

        self.repository.insert_item(&item)?;
        tracing::debug!(id = %item.id, name = %item.name, "added item");
        self.clear_form();
        self.refresh();
        Ok(SaveOutcome::Saved(item))
    }

    /// Replace the item under edit with the draft values
    ///
    /// `id` and `created_at` are carried over from the stored row.
    pub fn update(&mut self) -> Result<SaveOutcome, StoreError> {
        if self.draft.name_is_blank() {
            return Ok(self.skip(SkipReason::BlankName));
        }
        if self.draft.price_is_blank() {
            return Ok(self.skip(SkipReason::BlankPrice));
        }
        let Some(id) = self.draft.current_id().cloned() else {
            return Ok(self.skip(SkipReason::NotEditing));
        };

        let Some(existing) = self.repository.item_by_id(&id)? else {
            self.clear_form();
            return Ok(self.skip(SkipReason::Missing));
        };

        let item = Item {
            id,
            name: self.draft.name.clone(),
            price: self.draft.parsed_price(),
            quantity: self.draft.parsed_quantity(),
            department: self.draft.department.clone(),
            sku: self.draft.sku.clone(),
            best_by: self.draft.best_by,
            created_at: existing.created_at,
        };

        self.repository.update_item(&item)?;
        tracing::debug!(id = %item.id, "updated item");
        self.clear_form();
        self.refresh();
        Ok(SaveOutcome::Saved(item))
    }

    /// `update` when editing an existing item, otherwise `add`
    pub fn save(&mut self) -> Result<SaveOutcome, StoreError> {
        if self.draft.current_id().is_some() {
            self.update()
        } else {
            self.add()
        }
    }

    /// Delete `item`; the draft is left alone
    pub fn delete(&mut self, item: &Item) -> Result<(), StoreError> {
        self.repository.delete_item(item)?;
        tracing::debug!(id = %item.id, "deleted item");
        self.refresh();
        Ok(())
    }

    fn skip(&self, reason: SkipReason) -> SaveOutcome {
        tracing::info!(%reason, "save skipped");
        SaveOutcome::Skipped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::StoreRepository;
    use crate::core::store::{ItemStore, MemoryStore, SqliteStore};
    use chrono::{TimeZone, Utc};

    fn controller(store: &MemoryStore) -> ShoppingController<StoreRepository<'_, MemoryStore>> {
        ShoppingController::new(StoreRepository::new(store)).unwrap()
    }

    fn add(
        c: &mut ShoppingController<StoreRepository<'_, MemoryStore>>,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> Item {
        c.begin_new();
        let draft = c.draft().clone().with_name(name).with_price(price).with_quantity(quantity);
        c.set_draft(draft);
        c.add().unwrap().saved().cloned().unwrap()
    }

    #[test]
    fn test_add_milk_scenario() {
        let store = MemoryStore::new();
        let mut c = controller(&store);

        c.set_draft(
            Draft::default()
                .with_name("Milk")
                .with_price("3.5")
                .with_quantity("2")
                .with_department("Dairy")
                .with_sku("111"),
        );
        let outcome = c.add().unwrap();
        let milk = outcome.saved().unwrap();

        let stored = store.get_by_id(&milk.id).unwrap().unwrap();
        assert_eq!(stored.price, 3.5);
        assert_eq!(stored.quantity, 2);
        assert_eq!(stored.department, "Dairy");
        assert_eq!(stored.sku, "111");
        assert_eq!(stored.best_by, None);
        assert_eq!(c.total(), 7.0);
    }

    #[test]
    fn test_add_resets_draft() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        add(&mut c, "Milk", "3.5", "2");

        assert_eq!(c.draft(), &Draft::default());
        assert!(!c.is_editing());
    }

    #[test]
    fn test_unparsable_price_defaults_to_zero() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let item = add(&mut c, "Mystery", "abc", "3");

        assert_eq!(item.price, 0.0);
        assert_eq!(c.total(), 0.0);
    }

    #[test]
    fn test_unparsable_quantity_defaults_to_one() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let item = add(&mut c, "Bread", "2.5", "lots");

        assert_eq!(item.quantity, 1);
        assert_eq!(c.total(), 2.5);
    }

    #[test]
    fn test_blank_name_inserts_nothing() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        c.set_draft(Draft::new_item().with_name("   ").with_price("1"));

        let outcome = c.add().unwrap();
        assert_eq!(outcome, SaveOutcome::Skipped(SkipReason::BlankName));
        assert!(store.is_empty());
        assert!(c.items().is_empty());
        // Skipped saves keep the user's input
        assert_eq!(c.draft().price, "1");
        assert!(c.is_editing());
    }

    #[test]
    fn test_setup_edit_then_update_round_trips() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let best_by = Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap();
        c.set_draft(
            Draft::new_item()
                .with_name("Cheese")
                .with_price("19.99")
                .with_quantity("2")
                .with_department("Deli")
                .with_sku("CH-9")
                .with_best_by(Some(best_by)),
        );
        let original = c.add().unwrap().saved().cloned().unwrap();

        c.setup_edit(&original);
        assert!(c.is_editing());
        assert_eq!(c.draft().quantity, "2");
        let outcome = c.update().unwrap();

        let stored = store.get_by_id(&original.id).unwrap().unwrap();
        assert_eq!(stored, original);
        assert_eq!(outcome, SaveOutcome::Saved(original));
        assert!(!c.is_editing());
    }

    #[test]
    fn test_update_keeps_id_and_created_at() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");

        c.setup_edit(&milk);
        let draft = c.draft().clone().with_price("4");
        c.set_draft(draft);
        let updated = c.update().unwrap().saved().cloned().unwrap();

        assert_eq!(updated.id, milk.id);
        assert_eq!(updated.created_at, milk.created_at);
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.price, 4.0);
        assert_eq!(c.total(), 8.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_requires_name_and_price() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");

        c.setup_edit(&milk);
        let blank_price = c.draft().clone().with_price("");
        c.set_draft(blank_price);
        assert_eq!(
            c.update().unwrap(),
            SaveOutcome::Skipped(SkipReason::BlankPrice)
        );

        let blank_name = c.draft().clone().with_price("1").with_name(" ");
        c.set_draft(blank_name);
        assert_eq!(
            c.update().unwrap(),
            SaveOutcome::Skipped(SkipReason::BlankName)
        );
        assert_eq!(store.get_by_id(&milk.id).unwrap(), Some(milk));
    }

    #[test]
    fn test_update_without_setup_edit_is_reported() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        c.set_draft(Draft::new_item().with_name("Milk").with_price("1"));

        assert_eq!(
            c.update().unwrap(),
            SaveOutcome::Skipped(SkipReason::NotEditing)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_of_deleted_item_is_noop() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");

        c.setup_edit(&milk);
        store.delete(&milk).unwrap();

        assert_eq!(c.update().unwrap(), SaveOutcome::Skipped(SkipReason::Missing));
        assert!(store.is_empty());
        assert!(!c.is_editing());
    }

    #[test]
    fn test_save_dispatches_on_editing_state() {
        let store = MemoryStore::new();
        let mut c = controller(&store);

        c.begin_new();
        let draft = c.draft().clone().with_name("Eggs").with_price("5");
        c.set_draft(draft);
        let eggs = c.save().unwrap().saved().cloned().unwrap();
        assert_eq!(store.len(), 1);

        c.setup_edit(&eggs);
        let draft = c.draft().clone().with_quantity("2");
        c.set_draft(draft);
        c.save().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(c.total(), 10.0);
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");
        let bread = add(&mut c, "Bread", "2", "1");

        c.delete(&milk).unwrap();
        let after_once: Vec<_> = c.items().iter().cloned().collect();
        c.delete(&milk).unwrap();
        let after_twice: Vec<_> = c.items().iter().cloned().collect();

        assert_eq!(after_once, after_twice);
        assert_eq!(after_twice, vec![bread]);
        assert_eq!(c.total(), 2.0);
    }

    #[test]
    fn test_delete_leaves_draft_alone() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");

        c.set_draft(Draft::new_item().with_name("Half-typed"));
        c.delete(&milk).unwrap();
        assert_eq!(c.draft().name, "Half-typed");
    }

    #[test]
    fn test_clear_form_cancels_edit() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let milk = add(&mut c, "Milk", "3.5", "2");

        c.setup_edit(&milk);
        c.clear_form();
        assert_eq!(c.draft(), &Draft::default());
        assert_eq!(store.get_by_id(&milk.id).unwrap(), Some(milk));
    }

    #[test]
    fn test_items_newest_first_and_total_tracks_every_mutation() {
        let store = MemoryStore::new();
        let mut c = controller(&store);

        let a = add(&mut c, "A", "1.5", "2");
        let b = add(&mut c, "B", "0.25", "4");
        let names: Vec<_> = c.items().iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(c.total(), 4.0);

        c.setup_edit(&a);
        let draft = c.draft().clone().with_quantity("6");
        c.set_draft(draft);
        c.update().unwrap();
        assert_eq!(c.total(), 10.0);

        c.delete(&b).unwrap();
        assert_eq!(c.total(), 9.0);
        let items = c.items();
        assert_eq!(c.total(), total_cost(&items));
    }

    #[test]
    fn test_external_store_writes_reach_view() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        store
            .insert(&Item::new("Coffee", 12.0, 1, "Pantry", "", None))
            .unwrap();

        assert_eq!(c.total(), 12.0);
        assert_eq!(c.items().len(), 1);
    }

    #[test]
    fn test_view_subscribers_get_replay_and_updates() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        add(&mut c, "Milk", "3.5", "2");

        let mut late = c.subscribe();
        assert_eq!(late.current().total, 7.0);
        assert_eq!(late.current().items.len(), 1);

        add(&mut c, "Bread", "2", "1");
        assert!(late.poll());
        assert_eq!(late.current().total, 9.0);
        assert_eq!(late.current().items[0].name, "Bread");
    }

    #[test]
    fn test_other_writer_reaches_subscribers_on_refresh() {
        let store = MemoryStore::new();
        let mut c1 = controller(&store);
        let mut c2 = controller(&store);
        let mut views = c1.subscribe();

        add(&mut c2, "Milk", "3.5", "2");
        assert!(!views.poll());

        c1.refresh();
        assert!(views.poll());
        assert_eq!(views.current().items.len(), 1);
        assert_eq!(views.current().total, 7.0);
    }

    #[test]
    fn test_fresh_subscriber_on_empty_list_gets_default() {
        let store = MemoryStore::new();
        let mut c = controller(&store);
        let sub = c.subscribe();
        assert!(sub.current().items.is_empty());
        assert_eq!(sub.current().total, 0.0);
    }

    #[test]
    fn test_controller_over_sqlite() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut c = ShoppingController::new(StoreRepository::new(&store)).unwrap();

        c.set_draft(Draft::new_item().with_name("Milk").with_price("3.5").with_quantity("2"));
        let milk = c.add().unwrap().saved().cloned().unwrap();
        assert_eq!(c.find(&milk.id).unwrap(), Some(milk.clone()));
        assert_eq!(c.total(), 7.0);

        c.setup_edit(&milk);
        c.update().unwrap();
        assert_eq!(store.get_by_id(&milk.id).unwrap(), Some(milk.clone()));

        c.delete(&milk).unwrap();
        assert_eq!(c.total(), 0.0);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_storage_fault_is_surfaced_and_draft_kept() {
        struct BrokenRepository;

        impl ShoppingRepository for BrokenRepository {
            fn all_items(&self) -> Result<LiveQuery, StoreError> {
                Ok(Publisher::<Snapshot>::new().subscribe(Arc::from(Vec::new())))
            }
            fn item_by_id(&self, _id: &ItemId) -> Result<Option<Item>, StoreError> {
                Ok(None)
            }
            fn insert_item(&self, _item: &Item) -> Result<(), StoreError> {
                Err(StoreError::Io(std::io::Error::other("disk full")))
            }
            fn update_item(&self, _item: &Item) -> Result<(), StoreError> {
                Err(StoreError::Io(std::io::Error::other("disk full")))
            }
            fn delete_item(&self, _item: &Item) -> Result<(), StoreError> {
                Err(StoreError::Io(std::io::Error::other("disk full")))
            }
        }

        let mut c = ShoppingController::new(BrokenRepository).unwrap();
        c.set_draft(Draft::new_item().with_name("Milk").with_price("3.5"));

        let err = c.add().unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(c.draft().name, "Milk");
        assert!(c.is_editing());

        let milk = Item::new("Milk", 3.5, 1, "", "", None);
        assert!(c.delete(&milk).is_err());
    }
}
