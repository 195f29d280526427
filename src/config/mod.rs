//! Configuration management for vibing.
//!
//! This module handles loading configuration and resolving data paths under
//! `~/.vibing/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, StorageConfig};
