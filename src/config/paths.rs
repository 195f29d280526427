//! Path resolution for vibing configuration and data files.
//!
//! All vibing data is stored in `~/.vibing/`:
//! - `config.yaml` - Main configuration file
//! - `vibing.db` - SQLite database holding tickets and ticket lists

use std::path::PathBuf;

use crate::error::VibingError;

/// Paths to vibing configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.vibing/`
    pub root: PathBuf,
    /// Config file: `~/.vibing/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.vibing/vibing.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// `VIBING_HOME` overrides the root directory when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VibingError> {
        if let Ok(root) = std::env::var("VIBING_HOME") {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            VibingError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".vibing")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("vibing.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), VibingError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                VibingError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
