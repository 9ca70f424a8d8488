//! History store gateway
//!
//! A store holds a flat collection of [`TranslationRecord`]s keyed by a
//! store-assigned id. Records are never updated, only created and deleted.

pub mod firestore;
pub mod memory;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::errors::StoreResult;
use crate::core::models::{DeleteReport, NewRecord, RecordId, TranslationRecord};

/// Remote collection of translation records
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Create one record; the store assigns the id and timestamp.
    async fn append(&self, record: &NewRecord) -> StoreResult<RecordId>;

    /// Every record in the collection, in store-defined order.
    async fn list_all(&self) -> StoreResult<Vec<TranslationRecord>>;

    /// Remove one record. Deleting a missing id succeeds.
    async fn delete_one(&self, id: &RecordId) -> StoreResult<()>;

    /// Enumerate then delete each record independently.
    ///
    /// Not atomic: a failed delete is counted and the sweep moves on, and
    /// records created after the listing survive.
    async fn delete_all(&self) -> StoreResult<DeleteReport> {
        let records = self.list_all().await?;
        let mut report = DeleteReport {
            attempted: records.len(),
            ..Default::default()
        };

        for record in records {
            if let Err(e) = self.delete_one(&record.id).await {
                warn!("Error deleting record {}: {}", record.id, e);
                report.record_failure(record.id);
            }
        }

        info!(
            "Erase sweep finished: {} attempted, {} failed",
            report.attempted, report.failed
        );

        Ok(report)
    }
}

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
