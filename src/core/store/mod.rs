//! Durable keyed table of shopping items
//!
//! The [`ItemStore`] trait is the storage contract:
//! - `insert` rejects a duplicate ID with [`StoreError::ConstraintViolation`]
//! - `update` and `delete` match on `id` and are silent no-ops when nothing matches
//! - `get_by_id` treats absence as a normal outcome
//! - `observe_all` hands out a [`LiveQuery`] that receives the full ordered
//!   table after every mutation
//!
//! Rows are ordered newest first (`created_at DESC`), ties broken by `id DESC`.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::cmp::Ordering;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::ItemId;
use crate::core::item::Item;
use crate::core::live::Subscription;

/// Current schema version; any other version is rejected (no migrations)
pub const SCHEMA_VERSION: i32 = 1;

/// Name of the single item table
pub const ITEMS_TABLE: &str = "shopping_items";

/// One emission of the live query: every row, newest first
pub type Snapshot = Arc<[Item]>;

/// Subscription to the ordered table contents
pub type LiveQuery = Subscription<Snapshot>;

/// Storage contract shared by the SQLite store and the in-memory fake
pub trait ItemStore {
    /// Insert a new row
    fn insert(&self, item: &Item) -> Result<(), StoreError>;

    /// Replace the row with `item.id` wholesale (last write wins)
    fn update(&self, item: &Item) -> Result<(), StoreError>;

    /// Remove the row with `item.id`
    fn delete(&self, item: &Item) -> Result<(), StoreError>;

    /// Point lookup
    fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;

    /// Subscribe to the ordered table contents
    fn observe_all(&self) -> Result<LiveQuery, StoreError>;
}

/// Storage-layer faults
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("item {id} already exists")]
    #[diagnostic(
        code(shoplist::store::constraint),
        help("item IDs are generated on add; the same record was inserted twice")
    )]
    ConstraintViolation { id: String },

    #[error("database schema version {found} does not match expected version {expected}")]
    #[diagnostic(
        code(shoplist::store::schema),
        help("this database was written by an incompatible version; point --db at a new file")
    )]
    SchemaMismatch { found: i32, expected: i32 },

    #[error("stored row {id} is unreadable: {reason}")]
    #[diagnostic(code(shoplist::store::corrupt_row))]
    CorruptRow { id: String, reason: String },

    #[error("sqlite error: {0}")]
    #[diagnostic(code(shoplist::store::sqlite))]
    Sqlite(#[from] rusqlite::Error),

    #[error("store I/O error: {0}")]
    #[diagnostic(code(shoplist::store::io))]
    Io(#[from] std::io::Error),
}

/// Newest-first comparison used by every store
pub fn newest_first(a: &Item, b: &Item) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
