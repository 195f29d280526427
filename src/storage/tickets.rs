//! Ticket CRUD, queries, and positional operations.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use tracing::debug;

use super::Store;
use crate::error::VibingError;
use crate::model::{NewTicket, Ticket, TicketChanges};

const TICKET_COLUMNS: &str = "id, title, description, list_id, sort_order, created_at";

impl Store {
    /// Insert a ticket and return the id the database assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_ticket(&self, ticket: &NewTicket) -> Result<i64, VibingError> {
        let conn = self.connection();
        let created_at = ticket.created_at.unwrap_or_else(Utc::now);

        conn.execute(
            r"INSERT INTO tickets (title, description, list_id, sort_order, created_at)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                ticket.title,
                ticket.description,
                ticket.list_id,
                ticket.order,
                created_at.to_rfc3339(),
            ],
        )
        .map_err(VibingError::database("Failed to insert ticket"))?;

        let id = conn.last_insert_rowid();
        debug!(ticket_id = id, list_id = %ticket.list_id, "Added ticket");
        Ok(id)
    }

    /// Get a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, VibingError> {
        self.connection()
            .query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                [id],
                row_to_ticket,
            )
            .optional()
            .map_err(VibingError::database(format!("Failed to query ticket {id}")))
    }

    /// Apply a partial update to a ticket.
    ///
    /// Returns the number of tickets updated: 0 when `id` does not exist.
    /// An empty change set writes nothing and reports whether the ticket
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_ticket(&self, id: i64, changes: &TicketChanges) -> Result<usize, VibingError> {
        if changes.is_empty() {
            return Ok(usize::from(self.get_ticket(id)?.is_some()));
        }

        let mut assignments = Vec::new();
        let mut values = Vec::new();

        if let Some(title) = &changes.title {
            values.push(Value::Text(title.clone()));
            assignments.push(format!("title = ?{}", values.len()));
        }
        if let Some(description) = &changes.description {
            values.push(description.clone().map_or(Value::Null, Value::Text));
            assignments.push(format!("description = ?{}", values.len()));
        }
        if let Some(list_id) = &changes.list_id {
            values.push(Value::Text(list_id.clone()));
            assignments.push(format!("list_id = ?{}", values.len()));
        }
        if let Some(order) = changes.order {
            values.push(Value::Integer(order));
            assignments.push(format!("sort_order = ?{}", values.len()));
        }

        values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE tickets SET {} WHERE id = ?{}",
            assignments.join(", "),
            values.len()
        );

        let updated = self
            .connection()
            .execute(&sql, params_from_iter(values))
            .map_err(VibingError::database(format!("Failed to update ticket {id}")))?;

        debug!(ticket_id = id, updated, "Updated ticket");
        Ok(updated)
    }

    /// Delete a ticket. Deleting a missing ticket is not an error.
    ///
    /// Returns whether a ticket was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_ticket(&self, id: i64) -> Result<bool, VibingError> {
        let rows = self
            .connection()
            .execute("DELETE FROM tickets WHERE id = ?1", [id])
            .map_err(VibingError::database(format!("Failed to delete ticket {id}")))?;

        debug!(ticket_id = id, removed = rows > 0, "Deleted ticket");
        Ok(rows > 0)
    }

    /// Get the tickets of one list, ascending by order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_tickets_by_list(&self, list_id: &str) -> Result<Vec<Ticket>, VibingError> {
        let mut stmt = self
            .connection()
            .prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE list_id = ?1
                 ORDER BY sort_order ASC, id ASC"
            ))
            .map_err(VibingError::database("Failed to prepare query"))?;

        let rows = stmt
            .query_map([list_id], row_to_ticket)
            .map_err(VibingError::database(format!(
                "Failed to query tickets for list '{list_id}'"
            )))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(VibingError::database("Failed to read ticket row"))
    }

    /// Get every ticket in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_tickets(&self) -> Result<Vec<Ticket>, VibingError> {
        let mut stmt = self
            .connection()
            .prepare(&format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id ASC"))
            .map_err(VibingError::database("Failed to prepare query"))?;

        let rows = stmt
            .query_map([], row_to_ticket)
            .map_err(VibingError::database("Failed to query tickets"))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(VibingError::database("Failed to read ticket row"))
    }

    /// Move a ticket to `new_list_id` at `new_order` in a single update.
    ///
    /// Other tickets keep their order; follow with
    /// [`reorder_tickets`](Self::reorder_tickets) to close gaps.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn move_ticket(
        &self,
        ticket_id: i64,
        new_list_id: &str,
        new_order: i64,
    ) -> Result<usize, VibingError> {
        self.update_ticket(
            ticket_id,
            &TicketChanges::default()
                .list_id(new_list_id)
                .order(new_order),
        )
    }

    /// Set each ticket's order to its index in `ordered_ids`.
    ///
    /// Runs in one transaction: either every ticket is renumbered or none
    /// is. `list_id` is not written or checked, and ids that match no
    /// ticket are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails; the whole batch is rolled back.
    pub fn reorder_tickets(&self, list_id: &str, ordered_ids: &[i64]) -> Result<(), VibingError> {
        let tx = self
            .connection()
            .unchecked_transaction()
            .map_err(VibingError::database("Failed to begin reorder transaction"))?;
        {
            let mut stmt = tx
                .prepare("UPDATE tickets SET sort_order = ?1 WHERE id = ?2")
                .map_err(VibingError::database("Failed to prepare reorder"))?;

            for (position, id) in ordered_ids.iter().enumerate() {
                let order = i64::try_from(position).map_err(|_| {
                    VibingError::InvalidArgument(format!("Position {position} out of range"))
                })?;
                stmt.execute(params![order, id])
                    .map_err(VibingError::database(format!("Failed to reorder ticket {id}")))?;
            }
        }
        tx.commit()
            .map_err(VibingError::database("Failed to commit reorder"))?;

        debug!(list_id, count = ordered_ids.len(), "Reordered tickets");
        Ok(())
    }

    /// The order one past the last ticket of `list_id` (0 for an empty list).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn next_order(&self, list_id: &str) -> Result<i64, VibingError> {
        self.connection()
            .query_row(
                "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM tickets WHERE list_id = ?1",
                [list_id],
                |row| row.get(0),
            )
            .map_err(VibingError::database(format!(
                "Failed to find last position in list '{list_id}'"
            )))
    }
}

/// Convert a database row to a Ticket.
fn row_to_ticket(row: &Row<'_>) -> Result<Ticket, rusqlite::Error> {
    let created_at_str: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        list_id: row.get(3)?,
        order: row.get(4)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DONE_LIST_ID, IN_PROGRESS_LIST_ID, TODO_LIST_ID};

    fn create_test_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.initialize_default_lists().unwrap();
        store
    }

    fn add(store: &Store, title: &str, list_id: &str, order: i64) -> i64 {
        store
            .add_ticket(&NewTicket::new(title, list_id, order))
            .unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let store = create_test_store();

        let id = store
            .add_ticket(&NewTicket::new("Write docs", TODO_LIST_ID, 0).with_description("README"))
            .unwrap();

        let ticket = store.get_ticket(id).unwrap().unwrap();
        assert_eq!(ticket.id, id);
        assert_eq!(ticket.title, "Write docs");
        assert_eq!(ticket.description.as_deref(), Some("README"));
        assert_eq!(ticket.list_id, TODO_LIST_ID);
        assert_eq!(ticket.order, 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = create_test_store();

        let a = add(&store, "a", TODO_LIST_ID, 0);
        let b = add(&store, "b", TODO_LIST_ID, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = create_test_store();

        let a = add(&store, "a", TODO_LIST_ID, 0);
        store.delete_ticket(a).unwrap();
        let b = add(&store, "b", TODO_LIST_ID, 0);
        assert!(b > a);
    }

    #[test]
    fn test_created_at_round_trips() {
        let store = create_test_store();
        let created_at = DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut new_ticket = NewTicket::new("Dated", TODO_LIST_ID, 0);
        new_ticket.created_at = Some(created_at);
        let id = store.add_ticket(&new_ticket).unwrap();

        assert_eq!(store.get_ticket(id).unwrap().unwrap().created_at, created_at);
    }

    #[test]
    fn test_update_title_keeps_other_fields() {
        let store = create_test_store();
        let id = store
            .add_ticket(&NewTicket::new("Old", IN_PROGRESS_LIST_ID, 4).with_description("keep"))
            .unwrap();
        let before = store.get_ticket(id).unwrap().unwrap();

        let updated = store
            .update_ticket(id, &TicketChanges::default().title("x"))
            .unwrap();
        assert_eq!(updated, 1);

        let after = store.get_ticket(id).unwrap().unwrap();
        assert_eq!(after.title, "x");
        assert_eq!(
            after,
            Ticket {
                title: "x".to_string(),
                ..before
            }
        );
    }

    #[test]
    fn test_update_clears_description() {
        let store = create_test_store();
        let id = store
            .add_ticket(&NewTicket::new("t", TODO_LIST_ID, 0).with_description("gone soon"))
            .unwrap();

        store
            .update_ticket(id, &TicketChanges::default().description(None))
            .unwrap();
        assert!(store.get_ticket(id).unwrap().unwrap().description.is_none());
    }

    #[test]
    fn test_update_missing_ticket_returns_zero() {
        let store = create_test_store();

        let updated = store
            .update_ticket(42, &TicketChanges::default().title("x"))
            .unwrap();
        assert_eq!(updated, 0);
    }

    #[test]
    fn test_update_with_no_changes() {
        let store = create_test_store();
        let id = add(&store, "t", TODO_LIST_ID, 0);

        assert_eq!(store.update_ticket(id, &TicketChanges::default()).unwrap(), 1);
        assert_eq!(store.update_ticket(id + 1, &TicketChanges::default()).unwrap(), 0);
    }

    #[test]
    fn test_delete_twice_is_noop() {
        let store = create_test_store();
        let id = add(&store, "t", TODO_LIST_ID, 0);

        assert!(store.delete_ticket(id).unwrap());
        assert!(store.get_ticket(id).unwrap().is_none());

        assert!(!store.delete_ticket(id).unwrap());
    }

    #[test]
    fn test_get_tickets_by_list_sorted() {
        let store = create_test_store();
        add(&store, "third", TODO_LIST_ID, 2);
        add(&store, "elsewhere", DONE_LIST_ID, 0);
        add(&store, "first", TODO_LIST_ID, 0);
        add(&store, "second", TODO_LIST_ID, 1);

        let tickets = store.get_tickets_by_list(TODO_LIST_ID).unwrap();
        let titles: Vec<&str> = tickets.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert!(tickets.iter().all(|t| t.list_id == TODO_LIST_ID));
        assert!(tickets.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[test]
    fn test_get_tickets_by_unknown_list_is_empty() {
        let store = create_test_store();
        add(&store, "t", TODO_LIST_ID, 0);

        assert!(store.get_tickets_by_list("archive").unwrap().is_empty());
    }

    #[test]
    fn test_get_all_tickets() {
        let store = create_test_store();
        let a = add(&store, "a", TODO_LIST_ID, 0);
        let b = add(&store, "b", DONE_LIST_ID, 0);

        let ids: Vec<i64> = store
            .get_all_tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_move_ticket_touches_only_target() {
        let store = create_test_store();
        let moving = store
            .add_ticket(&NewTicket::new("moving", TODO_LIST_ID, 0).with_description("d"))
            .unwrap();
        let staying = add(&store, "staying", TODO_LIST_ID, 1);
        let resident = add(&store, "resident", DONE_LIST_ID, 0);

        let before = store.get_ticket(moving).unwrap().unwrap();
        let staying_before = store.get_ticket(staying).unwrap().unwrap();
        let resident_before = store.get_ticket(resident).unwrap().unwrap();

        assert_eq!(store.move_ticket(moving, DONE_LIST_ID, 0).unwrap(), 1);

        let after = store.get_ticket(moving).unwrap().unwrap();
        assert_eq!(
            after,
            Ticket {
                list_id: DONE_LIST_ID.to_string(),
                order: 0,
                ..before
            }
        );
        assert_eq!(store.get_ticket(staying).unwrap().unwrap(), staying_before);
        assert_eq!(store.get_ticket(resident).unwrap().unwrap(), resident_before);
    }

    #[test]
    fn test_move_missing_ticket() {
        let store = create_test_store();
        assert_eq!(store.move_ticket(99, DONE_LIST_ID, 0).unwrap(), 0);
    }

    #[test]
    fn test_reorder_tickets() {
        let store = create_test_store();
        let a = add(&store, "a", TODO_LIST_ID, 0);
        let b = add(&store, "b", TODO_LIST_ID, 1);
        let c = add(&store, "c", TODO_LIST_ID, 2);

        store.reorder_tickets(TODO_LIST_ID, &[b, a, c]).unwrap();

        let order_of = |id| store.get_ticket(id).unwrap().unwrap().order;
        assert_eq!(order_of(b), 0);
        assert_eq!(order_of(a), 1);
        assert_eq!(order_of(c), 2);

        // Same input again changes nothing
        store.reorder_tickets(TODO_LIST_ID, &[b, a, c]).unwrap();
        let ids: Vec<i64> = store
            .get_tickets_by_list(TODO_LIST_ID)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![b, a, c]);
    }

    #[test]
    fn test_reorder_closes_gaps_after_move() {
        let store = create_test_store();
        let a = add(&store, "a", TODO_LIST_ID, 0);
        let b = add(&store, "b", TODO_LIST_ID, 1);
        let c = add(&store, "c", TODO_LIST_ID, 2);

        store.move_ticket(b, DONE_LIST_ID, 0).unwrap();
        store.reorder_tickets(TODO_LIST_ID, &[a, c]).unwrap();

        let orders: Vec<i64> = store
            .get_tickets_by_list(TODO_LIST_ID)
            .unwrap()
            .into_iter()
            .map(|t| t.order)
            .collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_reorder_skips_unknown_ids_and_keeps_list() {
        let store = create_test_store();
        let a = add(&store, "a", TODO_LIST_ID, 5);
        let foreign = add(&store, "foreign", DONE_LIST_ID, 7);

        store
            .reorder_tickets(TODO_LIST_ID, &[999, foreign, a])
            .unwrap();

        let foreign_ticket = store.get_ticket(foreign).unwrap().unwrap();
        assert_eq!(foreign_ticket.list_id, DONE_LIST_ID);
        assert_eq!(foreign_ticket.order, 1);
        assert_eq!(store.get_ticket(a).unwrap().unwrap().order, 2);
    }

    #[test]
    fn test_reorder_failure_rolls_back_whole_batch() {
        let store = create_test_store();
        let a = add(&store, "a", TODO_LIST_ID, 5);
        let b = add(&store, "b", TODO_LIST_ID, 6);

        store
            .connection()
            .execute_batch(&format!(
                "CREATE TRIGGER reject_reorder BEFORE UPDATE ON tickets
                 WHEN OLD.id = {b}
                 BEGIN SELECT RAISE(ABORT, 'ticket is locked'); END;"
            ))
            .unwrap();

        let result = store.reorder_tickets(TODO_LIST_ID, &[a, b]);
        assert!(matches!(result, Err(VibingError::Database { .. })));

        assert_eq!(store.get_ticket(a).unwrap().unwrap().order, 5);
        assert_eq!(store.get_ticket(b).unwrap().unwrap().order, 6);
    }

    #[test]
    fn test_next_order() {
        let store = create_test_store();
        assert_eq!(store.next_order(TODO_LIST_ID).unwrap(), 0);

        add(&store, "a", TODO_LIST_ID, 0);
        add(&store, "b", TODO_LIST_ID, 4);
        assert_eq!(store.next_order(TODO_LIST_ID).unwrap(), 5);
        assert_eq!(store.next_order(DONE_LIST_ID).unwrap(), 0);
    }
}
