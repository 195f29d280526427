//! Ticket list (board column) queries and seeding.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::Store;
use crate::error::VibingError;
use crate::model::{default_lists, TicketList};

impl Store {
    /// Seed the default lists if the list table is empty.
    ///
    /// Safe to call on every startup. Returns how many lists were inserted
    /// (0 when any list already exists).
    ///
    /// # Errors
    ///
    /// Returns an error if the count or the batch insert fails.
    pub fn initialize_default_lists(&self) -> Result<usize, VibingError> {
        if self.count_lists()? > 0 {
            return Ok(0);
        }

        let lists = default_lists();
        let tx = self
            .connection()
            .unchecked_transaction()
            .map_err(VibingError::database("Failed to begin seeding transaction"))?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO ticket_lists (id, name, sort_order) VALUES (?1, ?2, ?3)")
                .map_err(VibingError::database("Failed to prepare list insert"))?;

            for list in &lists {
                stmt.execute(params![list.id, list.name, list.order])
                    .map_err(VibingError::database(format!(
                        "Failed to insert list '{}'",
                        list.id
                    )))?;
            }
        }
        tx.commit()
            .map_err(VibingError::database("Failed to commit default lists"))?;

        info!(count = lists.len(), "Seeded default lists");
        Ok(lists.len())
    }

    /// Get every list, ordered by display position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_lists(&self) -> Result<Vec<TicketList>, VibingError> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id, name, sort_order FROM ticket_lists ORDER BY sort_order ASC")
            .map_err(VibingError::database("Failed to prepare query"))?;

        let rows = stmt
            .query_map([], row_to_list)
            .map_err(VibingError::database("Failed to query lists"))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(VibingError::database("Failed to read list row"))
    }

    /// Get a list by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_list(&self, id: &str) -> Result<Option<TicketList>, VibingError> {
        self.connection()
            .query_row(
                "SELECT id, name, sort_order FROM ticket_lists WHERE id = ?1",
                [id],
                row_to_list,
            )
            .optional()
            .map_err(VibingError::database(format!("Failed to query list '{id}'")))
    }

    /// Number of stored lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_lists(&self) -> Result<usize, VibingError> {
        let count: i64 = self
            .connection()
            .query_row("SELECT COUNT(*) FROM ticket_lists", [], |row| row.get(0))
            .map_err(VibingError::database("Failed to count lists"))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn row_to_list(row: &Row<'_>) -> Result<TicketList, rusqlite::Error> {
    Ok(TicketList {
        id: row.get(0)?,
        name: row.get(1)?,
        order: row.get(2)?,
    })
}
