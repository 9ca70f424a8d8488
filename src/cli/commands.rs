//! CLI command definitions and handlers

use clap::Subcommand;
use std::sync::Arc;
use tracing::info;

use crate::core::config::SyncConfig;
use crate::core::models::PersistOutcome;
use crate::core::provider::{MyMemoryProvider, TranslationProvider};
use crate::core::sync::{DynSyncClient, SyncClient};
use crate::store::{FirestoreStore, HistoryStore, MemoryStore};

/// Commands for Translate Sync
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a line of text and save it to the history
    Translate {
        /// Text to translate
        text: String,
    },

    /// List saved translations
    History,

    /// Erase all saved translations
    Erase,

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Wire the provider and store gateways described by `config`
pub fn build_client(config: &SyncConfig, memory_store: bool) -> anyhow::Result<DynSyncClient> {
    config.validate(!memory_store)?;

    let provider: Arc<dyn TranslationProvider> =
        Arc::new(MyMemoryProvider::new(config.provider.clone())?);

    let store: Arc<dyn HistoryStore> = if memory_store {
        info!("Using in-memory history store");
        Arc::new(MemoryStore::new())
    } else {
        info!(
            "Using Firestore collection {} in project {}",
            config.store.collection, config.store.project_id
        );
        Arc::new(FirestoreStore::new(config.store.clone())?)
    };

    Ok(SyncClient::new(
        provider,
        store,
        config.provider.languages.clone(),
    ))
}

/// Handle translate command
pub async fn handle_translate(client: &DynSyncClient, text: String) -> anyhow::Result<()> {
    info!("Translating ({})", client.languages());

    let outcome = client.request_translation(&text).await;

    println!("Translated: {}", outcome.display);
    match outcome.persistence {
        PersistOutcome::Saved(id) => println!("   Saved as {}", id),
        PersistOutcome::Failed(reason) => {
            eprintln!("   Not saved: {}", reason)
        }
        PersistOutcome::Skipped => {}
    }

    Ok(())
}

/// Handle history command
pub async fn handle_history(client: &DynSyncClient) -> anyhow::Result<()> {
    let history = client.load_history().await;

    if let Some(error) = &history.error {
        eprintln!("⚠️  Could not load history: {}", error);
    }

    if history.records.is_empty() {
        println!("No saved translations.");
        return Ok(());
    }

    println!("Saved translations ({}):", history.records.len());
    for record in &history.records {
        println!("\nOriginal: {}", record.original);
        println!("Translated: {}", record.translated);
    }

    Ok(())
}

/// Handle erase command
pub async fn handle_erase(client: &DynSyncClient) -> anyhow::Result<()> {
    let report = client.erase_history().await;

    if let Some(error) = &report.listing_error {
        eprintln!("⚠️  Could not enumerate history: {}", error);
        return Ok(());
    }

    println!("✅ Erase completed!");
    println!("   Deleted: {}", report.succeeded());
    println!("   Failed: {}", report.failed);
    for id in &report.failed_ids {
        println!("   - {}", id);
    }

    Ok(())
}

/// Handle server command
pub async fn handle_server(client: DynSyncClient, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(client, host, port).await?;

    Ok(())
}
