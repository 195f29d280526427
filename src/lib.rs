//! vibing - a local kanban ticket store
//!
//! This crate persists tickets and the columns (ticket lists) they live in to
//! a local `SQLite` database, carries older databases forward through a
//! versioned migration sequence, and exposes CRUD, query, and reorder
//! operations on top. A thin CLI drives the same operations.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::VibingError;
pub use model::{NewTicket, Ticket, TicketChanges, TicketList};
pub use storage::Store;
