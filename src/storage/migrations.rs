//! Database migrations for vibing.
//!
//! Every schema version declares the same two tables; versions 2 and 3 also
//! carry a data step that repairs list rows written by older releases.
//! Steps run in ascending version order, one transaction per version, when
//! the store is opened.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, error, info, warn};

use crate::error::VibingError;
use crate::model::{BLOCKED_LIST_ID, DONE_LIST_ID, IN_PROGRESS_LIST_ID};

/// Latest schema version this build understands.
pub const LATEST_VERSION: i32 = 3;

/// Tables and secondary indexes, identical for every declared version.
const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS tickets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        list_id TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_tickets_title ON tickets(title);
    CREATE INDEX IF NOT EXISTS idx_tickets_list_id ON tickets(list_id);
    CREATE INDEX IF NOT EXISTS idx_tickets_sort_order ON tickets(sort_order);

    CREATE TABLE IF NOT EXISTS ticket_lists (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        sort_order INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_ticket_lists_name ON ticket_lists(name);
    CREATE INDEX IF NOT EXISTS idx_ticket_lists_sort_order ON ticket_lists(sort_order);
";

type UpgradeFn = fn(&Connection) -> Result<(), VibingError>;

/// One declared schema version and its optional data step.
struct Migration {
    version: i32,
    name: &'static str,
    upgrade: Option<UpgradeFn>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial schema",
        upgrade: None,
    },
    Migration {
        version: 2,
        name: "rename in-progress list",
        upgrade: Some(rename_in_progress_list),
    },
    Migration {
        version: 3,
        name: "add blocked list",
        upgrade: Some(add_blocked_list),
    },
];

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, VibingError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(VibingError::database("Failed to get schema version"))
}

/// Set the schema version. Transactional when called inside one.
fn set_version(conn: &Connection, version: i32) -> Result<(), VibingError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(VibingError::database(format!(
            "Failed to set schema version {version}"
        )))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), VibingError> {
    migrate_to(conn, LATEST_VERSION)
}

/// Bring the database up to `target`.
///
/// A new database gets the schema directly at `target`; its data steps are
/// skipped since there is no older data to repair.
pub(crate) fn migrate_to(conn: &Connection, target: i32) -> Result<(), VibingError> {
    let current = get_version(conn)?;

    if current > LATEST_VERSION {
        warn!(
            version = current,
            latest = LATEST_VERSION,
            "Database was written by a newer release; opening without migrating"
        );
        return Ok(());
    }

    if current >= target {
        debug!(version = current, "Schema is up to date");
        return Ok(());
    }

    if current == 0 {
        let tx = conn
            .unchecked_transaction()
            .map_err(VibingError::database("Failed to begin schema transaction"))?;
        tx.execute_batch(SCHEMA)
            .map_err(VibingError::database("Failed to create schema"))?;
        set_version(&tx, target)?;
        tx.commit()
            .map_err(VibingError::database("Failed to commit schema"))?;

        info!(version = target, "Created database schema");
        return Ok(());
    }

    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.version > current && m.version <= target)
    {
        apply(conn, migration)?;
    }

    Ok(())
}

/// Apply one migration in its own transaction.
///
/// A failing data step is logged and its writes rolled back; the version is
/// still stamped so opening continues.
fn apply(conn: &Connection, migration: &Migration) -> Result<(), VibingError> {
    let mut tx = conn.unchecked_transaction().map_err(VibingError::database(format!(
        "Failed to begin migration v{}",
        migration.version
    )))?;

    tx.execute_batch(SCHEMA).map_err(VibingError::database(format!(
        "Migration v{} failed to declare schema",
        migration.version
    )))?;

    if let Some(upgrade) = migration.upgrade {
        let step = tx.savepoint().map_err(VibingError::database(format!(
            "Failed to open savepoint for migration v{}",
            migration.version
        )))?;

        match upgrade(&step) {
            Ok(()) => step.commit().map_err(VibingError::database(format!(
                "Failed to release savepoint for migration v{}",
                migration.version
            )))?,
            // Dropping the savepoint rolls back the partial step.
            Err(e) => error!(
                version = migration.version,
                migration = migration.name,
                error = %e,
                "Upgrade step failed; continuing"
            ),
        }
    }

    set_version(&tx, migration.version)?;
    tx.commit().map_err(VibingError::database(format!(
        "Failed to commit migration v{}",
        migration.version
    )))?;

    info!(
        version = migration.version,
        migration = migration.name,
        "Applied migration"
    );
    Ok(())
}

/// v1 -> v2: "In Progress" became "Ongoing".
fn rename_in_progress_list(conn: &Connection) -> Result<(), VibingError> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM ticket_lists WHERE id = ?1",
            [IN_PROGRESS_LIST_ID],
            |row| row.get(0),
        )
        .optional()
        .map_err(VibingError::database(format!(
            "Failed to read list '{IN_PROGRESS_LIST_ID}'"
        )))?;

    match name.as_deref() {
        Some("In Progress") => {
            conn.execute(
                "UPDATE ticket_lists SET name = ?1 WHERE id = ?2",
                params!["Ongoing", IN_PROGRESS_LIST_ID],
            )
            .map_err(VibingError::database(format!(
                "Failed to rename list '{IN_PROGRESS_LIST_ID}'"
            )))?;
            info!(list_id = IN_PROGRESS_LIST_ID, "Renamed list to Ongoing");
        }
        Some(other) => debug!(list_id = IN_PROGRESS_LIST_ID, name = other, "List already renamed"),
        None => debug!(list_id = IN_PROGRESS_LIST_ID, "List absent; nothing to rename"),
    }

    Ok(())
}

/// v2 -> v3: "Done" moves to position 3 and "Blocked" takes position 2.
fn add_blocked_list(conn: &Connection) -> Result<(), VibingError> {
    let moved = conn
        .execute(
            "UPDATE ticket_lists SET sort_order = 3 WHERE id = ?1",
            [DONE_LIST_ID],
        )
        .map_err(VibingError::database(format!(
            "Failed to reorder list '{DONE_LIST_ID}'"
        )))?;

    if moved == 0 {
        warn!(list_id = DONE_LIST_ID, "Expected list not found; order left unchanged");
    }

    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO ticket_lists (id, name, sort_order) VALUES (?1, ?2, ?3)",
            params![BLOCKED_LIST_ID, "Blocked", 2],
        )
        .map_err(VibingError::database(format!(
            "Failed to insert list '{BLOCKED_LIST_ID}'"
        )))?;

    if inserted > 0 {
        info!(list_id = BLOCKED_LIST_ID, "Added list");
    }

    Ok(())
}
