pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use log::debug;
use std::path::PathBuf;

use crate::config;
use crate::utils::error::BoxResult;
use types::Commands;

/// Run the command-line interface
pub fn run() -> BoxResult<()> {
    let cli = types::Cli::parse();

    // Initialize logging system
    logging::init_logging(cli.debug);

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    let source = cli.source.clone().unwrap_or_else(|| PathBuf::from("./"));
    let config = config::load_config(&source, cli.config.clone())?;
    debug!("Using store {}", config.store_path().display());

    match &cli.command {
        Commands::Slug { .. } => commands::handle_slug_command(&cli.command, &config),
        Commands::Toc { .. } => commands::handle_toc_command(&cli.command, &config),
        Commands::Anchors { .. } => commands::handle_anchors_command(&cli.command, &config),
        Commands::Post { action } => commands::handle_post_command(action, &config),
        Commands::Topic { action } => commands::handle_topic_command(action, &config),
        Commands::Export { dir } => commands::handle_export_command(dir.as_ref(), &config),
    }
}
