//! SQLite-backed item store

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

use super::{ItemStore, LiveQuery, Snapshot, StoreError};
use crate::core::identity::ItemId;
use crate::core::item::{date_to_millis, millis_to_date, Item};
use crate::core::live::Publisher;

const SELECT_COLUMNS: &str =
    "SELECT id, name, price, quantity, department, sku, best_by_date, created_at FROM shopping_items";

/// The item table backed by a SQLite database file
///
/// Acquire once at startup and lend it to the repository for the lifetime of
/// the process; the connection closes when the store is dropped.
pub struct SqliteStore {
    pub(super) conn: Connection,
    path: Option<PathBuf>,
    live: Publisher<Snapshot>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
            live: Publisher::new(),
        };
        store.init_schema()?;
        tracing::debug!(path = %path.display(), "opened item store");
        Ok(store)
    }

    /// Open a private in-memory database (for tests and throwaway sessions)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
            live: Publisher::new(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Database file location, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM shopping_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All rows, newest first
    pub fn all_items(&self) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], read_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.into_item()?);
        }
        Ok(items)
    }

    /// Re-run the ordered query and push it to subscribers
    ///
    /// Runs after the write has committed, so a failed re-read is logged and
    /// subscribers keep their previous snapshot.
    fn notify(&self) {
        if !self.live.has_subscribers() {
            return;
        }
        match self.all_items() {
            Ok(items) => {
                let snapshot: Snapshot = Arc::from(items);
                tracing::trace!(rows = snapshot.len(), "publishing item snapshot");
                self.live.publish(snapshot);
            }
            Err(e) => tracing::warn!(error = %e, "could not refresh live query after write"),
        }
    }
}

impl ItemStore for SqliteStore {
    fn insert(&self, item: &Item) -> Result<(), StoreError> {
        let result = self.conn.execute(
            "INSERT INTO shopping_items (id, name, price, quantity, department, sku, best_by_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id.to_string(),
                item.name,
                item.price,
                item.quantity,
                item.department,
                item.sku,
                date_to_millis(item.best_by),
                item.created_at,
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                return Err(StoreError::ConstraintViolation {
                    id: item.id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(id = %item.id, name = %item.name, "inserted item");
        self.notify();
        Ok(())
    }

    fn update(&self, item: &Item) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE shopping_items
             SET name = ?2, price = ?3, quantity = ?4, department = ?5, sku = ?6,
                 best_by_date = ?7, created_at = ?8
             WHERE id = ?1",
            params![
                item.id.to_string(),
                item.name,
                item.price,
                item.quantity,
                item.department,
                item.sku,
                date_to_millis(item.best_by),
                item.created_at,
            ],
        )?;

        if changed == 0 {
            tracing::debug!(id = %item.id, "update matched no row");
            return Ok(());
        }
        tracing::debug!(id = %item.id, "updated item");
        self.notify();
        Ok(())
    }

    fn delete(&self, item: &Item) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "DELETE FROM shopping_items WHERE id = ?1",
            params![item.id.to_string()],
        )?;

        if changed == 0 {
            tracing::debug!(id = %item.id, "delete matched no row");
            return Ok(());
        }
        tracing::debug!(id = %item.id, "deleted item");
        self.notify();
        Ok(())
    }

    fn get_by_id(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let raw = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.to_string()],
                read_row,
            )
            .optional()?;

        raw.map(RawItem::into_item).transpose()
    }

    fn observe_all(&self) -> Result<LiveQuery, StoreError> {
        let current: Snapshot = Arc::from(self.all_items()?);
        Ok(self.live.subscribe(current))
    }
}

/// Column values as stored, before domain conversion
struct RawItem {
    id: String,
    name: String,
    price: f64,
    quantity: i64,
    department: String,
    sku: String,
    best_by_date: Option<i64>,
    created_at: i64,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawItem> {
    Ok(RawItem {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        quantity: row.get(3)?,
        department: row.get(4)?,
        sku: row.get(5)?,
        best_by_date: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl RawItem {
    fn into_item(self) -> Result<Item, StoreError> {
        let corrupt = |reason: String| StoreError::CorruptRow {
            id: self.id.clone(),
            reason,
        };

        let id = ItemId::parse(&self.id).map_err(|e| corrupt(e.to_string()))?;
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| corrupt(format!("quantity {} out of range", self.quantity)))?;
        let best_by = millis_to_date(self.best_by_date)
            .map_err(|ms| corrupt(format!("best-by timestamp {} out of range", ms)))?;

        Ok(Item {
            id,
            name: self.name,
            price: self.price,
            quantity,
            department: self.department,
            sku: self.sku,
            best_by,
            created_at: self.created_at,
        })
    }
}
