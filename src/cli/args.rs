use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "vibing")]
#[command(about = "A local kanban board for tickets, stored in SQLite")]
#[command(long_about = "vibing - a local kanban board

Tickets live in lists (board columns). The board is stored in a SQLite
database under ~/.vibing/ and upgraded automatically when a newer release
opens it.

QUICK START:
  vibing board                     Show every list with its tickets
  vibing add \"Fix login\"           Add a ticket to To Do
  vibing move 3 blocked            Move ticket 3 to the end of Blocked
  vibing reorder todo 4 2 7        Renumber the To Do list

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file to use instead of the configured one
    #[arg(long, global = true, env = "VIBING_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every list with its tickets
    #[command(alias = "b")]
    Board,

    /// List the board columns in display order
    Lists,

    /// List tickets, optionally only those of one list
    ///
    /// # Examples
    ///
    ///   vibing tickets                 All tickets
    ///   vibing tickets --list blocked  Tickets in Blocked, by position
    #[command(alias = "ls")]
    Tickets {
        /// Only show tickets in this list
        #[arg(short, long)]
        list: Option<String>,
    },

    /// Show a single ticket
    Show {
        /// Ticket id
        id: i64,
    },

    /// Add a ticket to the end of a list
    #[command(alias = "a")]
    Add {
        /// Ticket title
        title: String,

        /// List to add the ticket to
        #[arg(short, long, default_value = "todo")]
        list: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Change fields of a ticket
    ///
    /// Only the given fields are written.
    Update {
        /// Ticket id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        /// New list (does not renumber other tickets)
        #[arg(long)]
        list: Option<String>,

        /// New position within the list
        #[arg(long)]
        order: Option<i64>,
    },

    /// Delete a ticket
    #[command(alias = "rm")]
    Delete {
        /// Ticket id
        id: i64,
    },

    /// Move a ticket to another list
    ///
    /// Without --order the ticket goes to the end of the target list.
    #[command(alias = "mv")]
    Move {
        /// Ticket id
        id: i64,

        /// Target list
        list: String,

        /// Position in the target list
        #[arg(long)]
        order: Option<i64>,
    },

    /// Renumber a list's tickets in the given order
    ///
    /// # Examples
    ///
    ///   vibing reorder todo 4 2 7      Ticket 4 first, then 2, then 7
    Reorder {
        /// List the tickets belong to
        list: String,

        /// Ticket ids, first to last
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Seed the default lists if the board has none
    Init,

    /// Show the database location and schema version
    Version,
}
