//! Command implementations for vibing.
//!
//! Each command runs against an open [`Store`] and returns the text to print.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{Commands, OutputFormat};
use crate::error::VibingError;
use crate::model::{BoardColumn, NewTicket, TicketChanges};
use crate::output::{format_board, format_lists, format_ticket, format_tickets, to_json};
use crate::storage::{Store, LATEST_VERSION};

/// Dispatch a parsed command.
///
/// # Errors
///
/// Returns an error if the store operation or output formatting fails.
pub fn run(store: &Store, command: Commands, format: OutputFormat) -> Result<String, VibingError> {
    match command {
        Commands::Board => board(store, format),
        Commands::Lists => format_lists(&store.get_all_lists()?, format),
        Commands::Tickets { list } => tickets(store, list.as_deref(), format),
        Commands::Show { id } => show(store, id, format),
        Commands::Add {
            title,
            list,
            description,
        } => add(store, title, list, description, format),
        Commands::Update {
            id,
            title,
            description,
            clear_description,
            list,
            order,
        } => {
            let mut changes = TicketChanges {
                title,
                list_id: list,
                order,
                ..TicketChanges::default()
            };
            if clear_description {
                changes.description = Some(None);
            } else if let Some(description) = description {
                changes.description = Some(Some(description));
            }
            update(store, id, &changes, format)
        }
        Commands::Delete { id } => delete(store, id, format),
        Commands::Move { id, list, order } => move_to(store, id, &list, order, format),
        Commands::Reorder { list, ids } => reorder(store, &list, &ids, format),
        Commands::Init => init(store, format),
        Commands::Version => version(store, format),
    }
}

/// Every list with its tickets, in display order.
///
/// # Errors
///
/// Returns an error if a query or output formatting fails.
pub fn board(store: &Store, format: OutputFormat) -> Result<String, VibingError> {
    let columns = store
        .get_all_lists()?
        .into_iter()
        .map(|list| {
            let tickets = store.get_tickets_by_list(&list.id)?;
            Ok(BoardColumn { list, tickets })
        })
        .collect::<Result<Vec<_>, VibingError>>()?;

    format_board(&columns, format)
}

fn tickets(store: &Store, list: Option<&str>, format: OutputFormat) -> Result<String, VibingError> {
    match list {
        Some(list_id) => {
            let title = store
                .get_list(list_id)?
                .map_or_else(|| list_id.to_string(), |l| l.name);
            format_tickets(&store.get_tickets_by_list(list_id)?, &title, format)
        }
        None => format_tickets(&store.get_all_tickets()?, "All Tickets", format),
    }
}

fn show(store: &Store, id: i64, format: OutputFormat) -> Result<String, VibingError> {
    let ticket = store
        .get_ticket(id)?
        .ok_or_else(|| VibingError::NotFound(format!("ticket {id}")))?;
    format_ticket(&ticket, format)
}

fn add(
    store: &Store,
    title: String,
    list: String,
    description: Option<String>,
    format: OutputFormat,
) -> Result<String, VibingError> {
    if title.trim().is_empty() {
        return Err(VibingError::InvalidArgument(
            "Ticket title cannot be empty".to_string(),
        ));
    }

    let order = store.next_order(&list)?;
    let ticket = NewTicket {
        title,
        description,
        list_id: list,
        order,
        created_at: None,
    };
    let id = store.add_ticket(&ticket)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "listId": ticket.list_id, "order": order })),
        OutputFormat::Pretty => Ok(format!(
            "{} #{} {} to {}",
            "Added".green(),
            id,
            ticket.title.bold(),
            ticket.list_id.cyan()
        )),
    }
}

fn update(
    store: &Store,
    id: i64,
    changes: &TicketChanges,
    format: OutputFormat,
) -> Result<String, VibingError> {
    let updated = store.update_ticket(id, changes)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "updated": updated })),
        OutputFormat::Pretty if updated == 0 => Ok(format!("No ticket #{id}; nothing updated")),
        OutputFormat::Pretty => Ok(format!("{} #{id}", "Updated".green())),
    }
}

fn delete(store: &Store, id: i64, format: OutputFormat) -> Result<String, VibingError> {
    let removed = store.delete_ticket(id)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "deleted": removed })),
        OutputFormat::Pretty if removed => Ok(format!("{} #{id}", "Deleted".green())),
        OutputFormat::Pretty => Ok(format!("No ticket #{id}; nothing deleted")),
    }
}

fn move_to(
    store: &Store,
    id: i64,
    list: &str,
    order: Option<i64>,
    format: OutputFormat,
) -> Result<String, VibingError> {
    let order = match order {
        Some(order) => order,
        None => store.next_order(list)?,
    };
    let updated = store.move_ticket(id, list, order)?;

    match format {
        OutputFormat::Json => {
            to_json(&json!({ "id": id, "listId": list, "order": order, "updated": updated }))
        }
        OutputFormat::Pretty if updated == 0 => Ok(format!("No ticket #{id}; nothing moved")),
        OutputFormat::Pretty => Ok(format!(
            "{} #{id} to {} at position {order}",
            "Moved".green(),
            list.cyan()
        )),
    }
}

fn reorder(
    store: &Store,
    list: &str,
    ids: &[i64],
    format: OutputFormat,
) -> Result<String, VibingError> {
    store.reorder_tickets(list, ids)?;

    match format {
        OutputFormat::Json => format_tickets(&store.get_tickets_by_list(list)?, list, format),
        OutputFormat::Pretty => Ok(format!(
            "{} {} tickets in {}",
            "Reordered".green(),
            ids.len(),
            list.cyan()
        )),
    }
}

fn init(store: &Store, format: OutputFormat) -> Result<String, VibingError> {
    let inserted = store.initialize_default_lists()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "inserted": inserted })),
        OutputFormat::Pretty if inserted == 0 => Ok("Lists already exist; nothing to do".to_string()),
        OutputFormat::Pretty => Ok(format!("{} {inserted} default lists", "Created".green())),
    }
}

fn version(store: &Store, format: OutputFormat) -> Result<String, VibingError> {
    let schema = store.schema_version()?;
    let path = store
        .connection()
        .path()
        .filter(|p| !p.is_empty())
        .unwrap_or(":memory:")
        .to_string();

    match format {
        OutputFormat::Json => to_json(&json!({
            "package": env!("CARGO_PKG_VERSION"),
            "schemaVersion": schema,
            "latestSchemaVersion": LATEST_VERSION,
            "database": path,
        })),
        OutputFormat::Pretty => Ok(format!(
            "vibing {}\n  {}: {schema} (latest {LATEST_VERSION})\n  {}: {path}",
            env!("CARGO_PKG_VERSION"),
            "Schema".dimmed(),
            "Database".dimmed()
        )),
    }
}
