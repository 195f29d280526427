//! Command-line interface for vibing.

pub mod args;
pub mod commands;
