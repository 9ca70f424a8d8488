//! Main entry point for Translate Sync CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translate_sync::cli::commands::{self, Commands};
use translate_sync::SyncConfig;

/// Translate Sync - translate text and keep a remote history
#[derive(Parser, Debug)]
#[command(name = "translate-sync", version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults to environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep history in memory instead of Firestore
    #[arg(long)]
    memory_store: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::from_env()?,
    };

    let Some(command) = args.command else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    let client = commands::build_client(&config, args.memory_store)?;

    match command {
        Commands::Translate { text } => commands::handle_translate(&client, text).await?,
        Commands::History => commands::handle_history(&client).await?,
        Commands::Erase => commands::handle_erase(&client).await?,
        Commands::Server { host, port } => commands::handle_server(client, host, port).await?,
    }

    Ok(())
}
