//! JSON output formatting for vibing.

use serde::Serialize;
use serde_json::json;

use crate::error::VibingError;
use crate::model::{BoardColumn, Ticket, TicketList};

/// Format tickets as JSON
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_tickets_json(tickets: &[Ticket], title: &str) -> Result<String, VibingError> {
    let output = json!({
        "list": title,
        "count": tickets.len(),
        "items": tickets
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format ticket lists as JSON
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_lists_json(lists: &[TicketList]) -> Result<String, VibingError> {
    let output = json!({
        "count": lists.len(),
        "items": lists
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the board as JSON
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_board_json(columns: &[BoardColumn]) -> Result<String, VibingError> {
    let output = json!({
        "count": columns.len(),
        "lists": columns
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, VibingError> {
    Ok(serde_json::to_string_pretty(value)?)
}
