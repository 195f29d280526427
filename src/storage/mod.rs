//! Storage layer for vibing.
//!
//! This module provides SQLite-based persistence for:
//! - Tickets (CRUD, per-list queries, moves and reorders)
//! - Ticket lists (lazy seeding of the default board columns)
//! - Schema versioning and upgrade steps

mod database;
mod lists;
mod migrations;
mod tickets;

pub use database::Store;
pub use migrations::LATEST_VERSION;
