//! Error types for vibing.

use thiserror::Error;

/// Errors returned by the store, configuration, and CLI layers.
#[derive(Error, Debug)]
pub enum VibingError {
    /// The storage engine rejected an operation.
    #[error("Database error: {context}: {source}")]
    Database {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A lookup by key found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VibingError {
    /// Build a `map_err` adapter that wraps a `rusqlite::Error` with context.
    pub fn database(context: impl Into<String>) -> impl FnOnce(rusqlite::Error) -> Self {
        let context = context.into();
        move |source| Self::Database { context, source }
    }
}
