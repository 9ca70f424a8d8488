//! Translate Sync - translation client with remote history
//!
//! Requests a translation from a public provider, records successful
//! translations in a remote document collection and exposes list and
//! erase-all operations over that history.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience
pub use core::{
    config::{ProviderConfig, StoreConfig, SyncConfig},
    errors::{StoreError, TranslationError},
    models::{
        AttemptState, DeleteReport, HistoryLoad, LanguagePair, NewRecord, PersistOutcome,
        RecordId, TranslationOutcome, TranslationRecord, TRANSLATION_FAILED,
    },
    provider::{MyMemoryProvider, TranslationProvider},
    sync::{DynSyncClient, SyncClient, TranslationAttempt},
};

pub use store::{FirestoreStore, HistoryStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
