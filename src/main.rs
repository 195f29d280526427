use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vibing::cli::args::Cli;
use vibing::cli::commands;
use vibing::config::{ColorSetting, Config, LoggingConfig, Paths};
use vibing::error::VibingError;
use vibing::storage::Store;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing(logging: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), VibingError> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let mut config = Config::load_from_path(&paths.config_file)?;

    init_tracing(&config.logging);

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    if let Some(db) = cli.db {
        config.storage.database = Some(db);
    }
    let format = cli.output.unwrap_or(config.general.default_output);

    let store = Store::open_with_config(&config, &paths)?;
    let output = commands::run(&store, cli.command, format)?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
