//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::core::models::LanguagePair;

const DEFAULT_PROVIDER_ENDPOINT: &str = "https://api.mymemory.translated.net";
const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_COLLECTION: &str = "translations";
const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Translation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub languages: LanguagePair,
    /// Sent as `de=` to raise the anonymous quota
    pub contact_email: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROVIDER_ENDPOINT.to_string(),
            languages: LanguagePair::default(),
            contact_email: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// History store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub collection: String,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FIRESTORE_ENDPOINT.to_string(),
            project_id: String::new(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    /// Documents root, e.g. `.../projects/p/databases/(default)/documents`
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.endpoint.trim_end_matches('/'),
            self.project_id
        )
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_url(), self.collection)
    }
}

/// Configuration for the sync client and both gateways
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    pub provider: ProviderConfig,
    pub store: StoreConfig,
}

impl SyncConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()?;

        let provider = ProviderConfig {
            endpoint: std::env::var("TRANSLATE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_ENDPOINT.to_string()),
            languages: LanguagePair::new(
                std::env::var("SOURCE_LANG").unwrap_or_else(|_| "en".to_string()),
                std::env::var("TARGET_LANG").unwrap_or_else(|_| "es".to_string()),
            ),
            contact_email: std::env::var("MYMEMORY_EMAIL").ok().filter(|e| !e.is_empty()),
            timeout_ms,
        };

        let store = StoreConfig {
            endpoint: std::env::var("FIRESTORE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_FIRESTORE_ENDPOINT.to_string()),
            project_id: std::env::var("FIRESTORE_PROJECT_ID").unwrap_or_default(),
            collection: std::env::var("HISTORY_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string()),
            timeout_ms,
        };

        info!(
            "Loaded config: languages {}, collection {}",
            provider.languages, store.collection
        );

        Ok(Self { provider, store })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration. The store is only checked when it will be used.
    pub fn validate(&self, remote_store: bool) -> anyhow::Result<()> {
        if self.provider.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Provider endpoint is required"));
        }

        if self.provider.languages.source.is_empty() || self.provider.languages.target.is_empty() {
            return Err(anyhow::anyhow!("Source and target languages are required"));
        }

        if self.provider.languages.source == self.provider.languages.target {
            warn!("Source and target language are both {}", self.provider.languages.source);
        }

        if remote_store {
            if self.store.project_id.is_empty() {
                return Err(anyhow::anyhow!("FIRESTORE_PROJECT_ID is required"));
            }

            if self.store.collection.is_empty() || self.store.collection.contains('/') {
                return Err(anyhow::anyhow!(
                    "Invalid collection name: {:?}",
                    self.store.collection
                ));
            }
        }

        Ok(())
    }
}
