//! Core module - item model, storage, repository and view state

pub mod config;
pub mod controller;
pub mod draft;
pub mod identity;
pub mod item;
pub mod live;
pub mod repository;
pub mod store;

pub use config::Config;
pub use controller::{SaveOutcome, ShoppingController, SkipReason, ViewState};
pub use draft::Draft;
pub use identity::{IdParseError, ItemId};
pub use item::{total_cost, Item};
pub use live::{Publisher, Subscription};
pub use repository::{ShoppingRepository, StoreRepository};
pub use store::{ItemStore, LiveQuery, MemoryStore, Snapshot, SqliteStore, StoreError};
