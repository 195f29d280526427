//! Domain types for tickets and the lists (board columns) that hold them.

mod types;

pub use types::{
    default_lists, BoardColumn, NewTicket, Ticket, TicketChanges, TicketList, BLOCKED_LIST_ID,
    DONE_LIST_ID, IN_PROGRESS_LIST_ID, TODO_LIST_ID,
};
