//! In-process history store

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::HistoryStore;
use crate::core::errors::StoreResult;
use crate::core::models::{NewRecord, RecordId, TranslationRecord};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<TranslationRecord>,
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
}

/// History kept in memory, listed in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, record: &NewRecord) -> StoreResult<RecordId> {
        let mut inner = self.inner.write().await;

        inner.next_id += 1;
        let id = RecordId::new(format!("mem-{:06}", inner.next_id));

        // Keep timestamps strictly increasing even if the clock stalls
        let now = Utc::now();
        let created_at = match inner.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_created = Some(created_at);

        inner.records.push(TranslationRecord {
            id: id.clone(),
            original: record.original.clone(),
            translated: record.translated.clone(),
            created_at: Some(created_at),
        });

        debug!("Stored record {}", id);
        Ok(id)
    }

    async fn list_all(&self) -> StoreResult<Vec<TranslationRecord>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn delete_one(&self, id: &RecordId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.records.retain(|r| &r.id != id);
        Ok(())
    }
}
