//! Firestore REST history store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::HistoryStore;
use crate::core::config::StoreConfig;
use crate::core::errors::{StoreError, StoreResult};
use crate::core::models::{NewRecord, RecordId, TranslationRecord};

const PAGE_SIZE: usize = 300;

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(rename = "createTime", default)]
    create_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

fn parse_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn id_from_name(name: &str) -> Option<RecordId> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(RecordId::new)
}

fn string_field(fields: Option<&Value>, key: &str) -> String {
    fields
        .and_then(|f| f.get(key))
        .and_then(|v| v.get("stringValue"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Convert a Firestore document, defaulting missing text fields to `""`.
/// Documents without a usable name are skipped.
fn record_from_document(doc: &Value) -> Option<TranslationRecord> {
    let id = doc.get("name").and_then(Value::as_str).and_then(id_from_name)?;
    let fields = doc.get("fields");

    let created_at = parse_time(doc.get("createTime").and_then(Value::as_str)).or_else(|| {
        parse_time(
            fields
                .and_then(|f| f.get("timestamp"))
                .and_then(|v| v.get("timestampValue"))
                .and_then(Value::as_str),
        )
    });

    Some(TranslationRecord {
        id,
        original: string_field(fields, "original"),
        translated: string_field(fields, "translated"),
        created_at,
    })
}

async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// History stored in a Firestore collection via the v1 REST API
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    config: Arc<StoreConfig>,
}

impl FirestoreStore {
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn document_url(&self, id: &RecordId) -> String {
        format!(
            "{}/{}",
            self.config.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }
}

#[async_trait]
impl HistoryStore for FirestoreStore {
    async fn append(&self, record: &NewRecord) -> StoreResult<RecordId> {
        let body = json!({
            "fields": {
                "original": { "stringValue": record.original },
                "translated": { "stringValue": record.translated },
                "timestamp": { "timestampValue": Utc::now().to_rfc3339() },
            }
        });

        let response = self
            .client
            .post(self.config.collection_url())
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let text = response.text().await?;
        let doc: Document = serde_json::from_str(&text)?;
        let id = id_from_name(&doc.name).ok_or_else(|| StoreError::MalformedResponse {
            message: format!("document name without id: {:?}", doc.name),
        })?;

        debug!(
            "Saved record {} (createTime {})",
            id,
            doc.create_time.as_deref().unwrap_or("-")
        );
        Ok(id)
    }

    async fn list_all(&self) -> StoreResult<Vec<TranslationRecord>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.config.collection_url())
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = check_status(request.send().await?).await?;
            let text = response.text().await?;
            let page: ListResponse = serde_json::from_str(&text)?;

            for doc in &page.documents {
                match record_from_document(doc) {
                    Some(record) => records.push(record),
                    None => warn!("Skipping document without a name: {}", doc),
                }
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Fetched {} records", records.len());
        Ok(records)
    }

    async fn delete_one(&self, id: &RecordId) -> StoreResult<()> {
        let response = self.client.delete(self.document_url(id)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("Record {} already gone", id);
            return Ok(());
        }

        check_status(response).await?;
        Ok(())
    }
}
