//! `SQLite` store for tickets and ticket lists.
//!
//! The database is stored at `~/.vibing/vibing.db` by default and contains:
//! - `tickets`: auto-numbered tickets, indexed by title, list and order
//! - `ticket_lists`: the board columns, keyed by a caller-chosen id

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::config::{Config, Paths};
use crate::error::VibingError;

use super::migrations;

/// Handle to one open ticket database.
///
/// Construct it once and pass it by reference to whatever needs it.
/// Opening always migrates the schema to [`super::LATEST_VERSION`].
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store described by `config`, seeding the default lists
    /// when `storage.seed_default_lists` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, migrated or seeded.
    pub fn open_with_config(config: &Config, paths: &Paths) -> Result<Self, VibingError> {
        let path = config.database_path(paths);
        if config.storage.database.is_none() {
            paths.ensure_dirs()?;
        }

        let store = Self::open_at(&path)?;
        if config.storage.seed_default_lists {
            store.initialize_default_lists()?;
        }

        Ok(store)
    }

    /// Open the store at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, VibingError> {
        let conn = Connection::open(path).map_err(VibingError::database(format!(
            "Failed to open database {}",
            path.display()
        )))?;

        debug!(path = %path.display(), "Opened database");
        Self::from_connection(conn)
    }

    /// Open an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_in_memory() -> Result<Self, VibingError> {
        let conn = Connection::open_in_memory()
            .map_err(VibingError::database("Failed to open in-memory database"))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, VibingError> {
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), VibingError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, VibingError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
