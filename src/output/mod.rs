//! Output formatting for vibing.
//!
//! This module provides formatters for displaying tickets and lists in
//! various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::VibingError;
use crate::model::{BoardColumn, Ticket, TicketList};

pub use json::*;
pub use pretty::*;

/// Format tickets based on output format
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_tickets(
    tickets: &[Ticket],
    title: &str,
    format: OutputFormat,
) -> Result<String, VibingError> {
    match format {
        OutputFormat::Pretty => Ok(format_tickets_pretty(tickets, title)),
        OutputFormat::Json => format_tickets_json(tickets, title),
    }
}

/// Format a single ticket based on output format
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_ticket(ticket: &Ticket, format: OutputFormat) -> Result<String, VibingError> {
    match format {
        OutputFormat::Pretty => Ok(format_ticket_pretty(ticket)),
        OutputFormat::Json => to_json(ticket),
    }
}

/// Format ticket lists based on output format
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_lists(lists: &[TicketList], format: OutputFormat) -> Result<String, VibingError> {
    match format {
        OutputFormat::Pretty => Ok(format_lists_pretty(lists)),
        OutputFormat::Json => format_lists_json(lists),
    }
}

/// Format the whole board based on output format
///
/// # Errors
///
/// Returns `VibingError::Parse` if JSON serialization fails.
pub fn format_board(columns: &[BoardColumn], format: OutputFormat) -> Result<String, VibingError> {
    match format {
        OutputFormat::Pretty => Ok(format_board_pretty(columns)),
        OutputFormat::Json => format_board_json(columns),
    }
}
