use colored::Colorize;

use crate::model::{BoardColumn, Ticket, TicketList};

/// Format a list of tickets as a pretty table
pub fn format_tickets_pretty(tickets: &[Ticket], title: &str) -> String {
    if tickets.is_empty() {
        return format!("{title} (0 items)\n  No tickets");
    }

    let mut output = format!("{} ({} items)\n", title, tickets.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for ticket in tickets {
        output.push_str(&ticket_line(ticket));
        output.push('\n');
    }

    output
}

fn ticket_line(ticket: &Ticket) -> String {
    format!(
        "{} {}  {}",
        format!("#{:<4}", ticket.id).dimmed(),
        ticket.title.bold(),
        ticket.list_id.cyan()
    )
}

/// Format a single ticket as pretty output
pub fn format_ticket_pretty(ticket: &Ticket) -> String {
    let mut output = format!("{}\n", ticket.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), ticket.id));
    output.push_str(&format!("  {}: {}\n", "List".dimmed(), ticket.list_id));
    output.push_str(&format!("  {}: {}\n", "Order".dimmed(), ticket.order));

    if let Some(description) = &ticket.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        ticket.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format ticket lists as pretty output
pub fn format_lists_pretty(lists: &[TicketList]) -> String {
    if lists.is_empty() {
        return "Lists (0)\n  No lists".to_string();
    }

    let mut output = format!("Lists ({})\n", lists.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for list in lists {
        output.push_str(&format!(
            "  {} {}  {}\n",
            list.order.to_string().dimmed(),
            list.name.bold(),
            list.id.cyan()
        ));
    }

    output
}

/// Format the board, one section per list
pub fn format_board_pretty(columns: &[BoardColumn]) -> String {
    if columns.is_empty() {
        return "Board (0 lists)\n  No lists".to_string();
    }

    let mut output = String::new();
    for column in columns {
        output.push_str(&format!(
            "{} ({})\n",
            column.list.name.bold().underline(),
            column.tickets.len()
        ));

        if column.tickets.is_empty() {
            output.push_str(&format!("  {}\n", "empty".dimmed()));
        }
        for ticket in &column.tickets {
            output.push_str(&format!(
                "  {} {}\n",
                format!("#{:<4}", ticket.id).dimmed(),
                ticket.title
            ));
        }
        output.push('\n');
    }

    output
}
