//! Shoplist: a local shopping list
//!
//! Items live in a single SQLite table. A live query pushes the ordered table
//! to the view-state controller after every change, and the controller keeps
//! the displayed list and total cost in sync with storage.

pub mod cli;
pub mod core;
