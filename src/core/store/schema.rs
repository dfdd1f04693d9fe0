//! Database schema initialization

use rusqlite::params;

use super::{SqliteStore, StoreError, SCHEMA_VERSION};

impl SqliteStore {
    /// Create tables if missing, then verify the schema version
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- One row per shopping-list entry
            CREATE TABLE IF NOT EXISTS shopping_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                quantity INTEGER NOT NULL,
                department TEXT NOT NULL,
                sku TEXT NOT NULL,
                best_by_date INTEGER,
                created_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_shopping_items_created
                ON shopping_items(created_at DESC, id DESC);
            "#,
        )?;

        let recorded: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))?;
        if recorded == 0 {
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }

        let found = self.schema_version()?;
        if found != SCHEMA_VERSION {
            return Err(StoreError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    /// Version recorded in the database
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let version = self.conn.query_row(
            "SELECT MAX(version) FROM schema_version",
            [],
            |row| row.get(0),
        )?;
        Ok(version)
    }
}
