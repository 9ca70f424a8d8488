//! Core data models for translation and history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown in place of a translation when the attempt failed
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// Store-assigned record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source and target language codes, rendered as `src|tgt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("en", "es")
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

/// A translation that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub original: String,
    pub translated: String,
}

impl NewRecord {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }
}

/// One persisted translation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub id: RecordId,
    pub original: String,
    pub translated: String,
    /// Server-assigned, only meaningful for ordering
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary of an erase-all sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub attempted: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_ids: Vec<RecordId>,
    /// Set when the records could not be enumerated at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_error: Option<String>,
}

impl DeleteReport {
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failed)
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.listing_error.is_none()
    }

    pub(crate) fn record_failure(&mut self, id: RecordId) {
        self.failed += 1;
        self.failed_ids.push(id);
    }
}

/// Lifecycle of one translation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl AttemptState {
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::Failed)
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptState::Idle => write!(f, "idle"),
            AttemptState::Requesting => write!(f, "requesting"),
            AttemptState::Succeeded => write!(f, "succeeded"),
            AttemptState::Failed => write!(f, "failed"),
        }
    }
}

/// What happened to the history write after a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum PersistOutcome {
    Saved(RecordId),
    Failed(String),
    /// Nothing to save because the translation failed
    Skipped,
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved(_))
    }
}

/// Result of `SyncClient::request_translation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    /// Text to display: the translation, or [`TRANSLATION_FAILED`]
    pub display: String,
    pub translated: Option<String>,
    pub state: AttemptState,
    pub persistence: PersistOutcome,
}

impl TranslationOutcome {
    pub fn is_success(&self) -> bool {
        self.state == AttemptState::Succeeded
    }
}

/// Result of `SyncClient::load_history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLoad {
    pub records: Vec<TranslationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
