//! Translation sync client
//!
//! Orchestrates the provider and the history store. Nothing here returns an
//! error to the caller: failures are logged and folded into the outcome
//! types so a presentation layer can always render something.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::models::{
    AttemptState, DeleteReport, HistoryLoad, LanguagePair, NewRecord, PersistOutcome,
    TranslationOutcome, TRANSLATION_FAILED,
};
use crate::core::provider::TranslationProvider;
use crate::store::HistoryStore;

/// State machine for a single translation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationAttempt {
    state: AttemptState,
}

impl Default for TranslationAttempt {
    fn default() -> Self {
        Self {
            state: AttemptState::Idle,
        }
    }
}

impl TranslationAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// `Idle -> Requesting`
    pub fn begin(&mut self) -> bool {
        self.advance(AttemptState::Idle, AttemptState::Requesting)
    }

    /// `Requesting -> Succeeded | Failed`
    pub fn finish(&mut self, success: bool) -> bool {
        let next = if success {
            AttemptState::Succeeded
        } else {
            AttemptState::Failed
        };
        self.advance(AttemptState::Requesting, next)
    }

    fn advance(&mut self, from: AttemptState, to: AttemptState) -> bool {
        if self.state != from {
            debug!("Ignoring transition {} -> {} from {}", from, to, self.state);
            return false;
        }
        self.state = to;
        true
    }
}

/// Client tying a [`TranslationProvider`] to a [`HistoryStore`]
///
/// Concurrent calls are independent; there is no sequencing between
/// attempts, so a caller displaying results should keep the last one that
/// completes.
pub struct SyncClient<P: ?Sized, S: ?Sized> {
    provider: Arc<P>,
    store: Arc<S>,
    languages: LanguagePair,
}

impl<P: ?Sized, S: ?Sized> Clone for SyncClient<P, S> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            store: Arc::clone(&self.store),
            languages: self.languages.clone(),
        }
    }
}

/// Sync client over trait objects, as wired by the binary
pub type DynSyncClient = SyncClient<dyn TranslationProvider, dyn HistoryStore>;

impl<P, S> SyncClient<P, S>
where
    P: TranslationProvider + ?Sized,
    S: HistoryStore + ?Sized,
{
    pub fn new(provider: Arc<P>, store: Arc<S>, languages: LanguagePair) -> Self {
        Self {
            provider,
            store,
            languages,
        }
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Translate `text` and, on success, record it in the history.
    ///
    /// The store write is awaited and reported in `persistence`; a failed
    /// write never changes the displayed translation.
    pub async fn request_translation(&self, text: &str) -> TranslationOutcome {
        let mut attempt = TranslationAttempt::new();
        attempt.begin();

        let translated = match self.provider.translate(text, &self.languages).await {
            Ok(translated) => {
                attempt.finish(true);
                translated
            }
            Err(e) => {
                attempt.finish(false);
                warn!("Translation request failed: {}", e);
                return TranslationOutcome {
                    display: TRANSLATION_FAILED.to_string(),
                    translated: None,
                    state: attempt.state(),
                    persistence: PersistOutcome::Skipped,
                };
            }
        };

        let persistence = match self.store.append(&NewRecord::new(text, translated.clone())).await {
            Ok(id) => {
                info!("Saved translation as {}", id);
                PersistOutcome::Saved(id)
            }
            Err(e) => {
                warn!("Error saving translation: {}", e);
                PersistOutcome::Failed(e.to_string())
            }
        };

        TranslationOutcome {
            display: translated.clone(),
            translated: Some(translated),
            state: attempt.state(),
            persistence,
        }
    }

    /// Fetch the full history. On failure the records are empty and the
    /// error is carried alongside.
    pub async fn load_history(&self) -> HistoryLoad {
        match self.store.list_all().await {
            Ok(records) => {
                debug!("Loaded {} history records", records.len());
                HistoryLoad {
                    records,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Error fetching history: {}", e);
                HistoryLoad {
                    records: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Delete every record currently in the history.
    pub async fn erase_history(&self) -> DeleteReport {
        match self.store.delete_all().await {
            Ok(report) => report,
            Err(e) => {
                warn!("Error fetching records for deletion: {}", e);
                DeleteReport {
                    listing_error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }
}
