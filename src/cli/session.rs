//! Store acquisition and controller wiring for a single command run

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, ItemStore, MemoryStore, ShoppingController, SqliteStore, StoreRepository};

/// Controller type every command works with
pub type CliController<'s> = ShoppingController<StoreRepository<'s, dyn ItemStore>>;

/// Open the store selected by the global flags and config
///
/// The store is opened once per process and lives until the command returns.
pub fn open_store(global: &GlobalOpts, config: &Config) -> Result<Box<dyn ItemStore>> {
    if global.in_memory {
        tracing::debug!("using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = global.db.clone().unwrap_or_else(|| config.db_path());
    Ok(Box::new(SqliteStore::open(&path)?))
}

/// Open the store, wire up a controller, and run `f` with it
pub fn with_controller<T>(
    global: &GlobalOpts,
    f: impl FnOnce(&mut CliController<'_>, &Config) -> Result<T>,
) -> Result<T> {
    let config = Config::load();
    let store = open_store(global, &config)?;
    let mut controller = ShoppingController::new(StoreRepository::new(&*store))?;
    f(&mut controller, &config)
}
