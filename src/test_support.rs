//! Test doubles shared by the unit tests

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::config::{ProviderConfig, StoreConfig};
use crate::core::errors::{Result, StoreError, StoreResult, TranslationError};
use crate::core::models::{LanguagePair, NewRecord, RecordId, TranslationRecord};
use crate::core::provider::TranslationProvider;
use crate::store::{HistoryStore, MemoryStore};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// ---------------------------------------------------------------------------
// Provider HTTP stub
// ---------------------------------------------------------------------------

struct ProviderState {
    status: StatusCode,
    body: String,
    hits: AtomicUsize,
    last_query: Mutex<Option<HashMap<String, String>>>,
}

async fn provider_get(
    State(state): State<Arc<ProviderState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().await = Some(query);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

/// Serves a fixed MyMemory-style response on `/get`
pub struct StubProvider {
    addr: SocketAddr,
    state: Arc<ProviderState>,
}

impl StubProvider {
    pub async fn spawn(status: u16, body: &str) -> Self {
        let state = Arc::new(ProviderState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            hits: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        });
        let app = Router::new()
            .route("/get", get(provider_get))
            .with_state(state.clone());

        Self {
            addr: serve(app).await,
            state,
        }
    }

    pub fn config(&self) -> ProviderConfig {
        ProviderConfig {
            endpoint: format!("http://{}", self.addr),
            timeout_ms: 5000,
            ..Default::default()
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub async fn last_query(&self) -> Option<HashMap<String, String>> {
        self.state.last_query.lock().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Firestore REST stub
// ---------------------------------------------------------------------------

struct StubDoc {
    id: String,
    fields: Value,
    create_time: DateTime<Utc>,
}

struct FirestoreState {
    docs: Vec<StubDoc>,
    next_id: i64,
    delete_calls: usize,
    fail_deletes: HashSet<String>,
    unavailable: bool,
    page_size: usize,
}

impl FirestoreState {
    fn insert(&mut self, fields: Value) -> &StubDoc {
        self.next_id += 1;
        let create_time = DateTime::<Utc>::from_timestamp(1_700_000_000 + self.next_id, 0)
            .unwrap();
        self.docs.push(StubDoc {
            id: format!("doc{:04}", self.next_id),
            fields,
            create_time,
        });
        self.docs.last().unwrap()
    }
}

type Shared = Arc<Mutex<FirestoreState>>;

fn doc_json(project: &str, collection: &str, doc: &StubDoc) -> Value {
    let time = doc.create_time.to_rfc3339_opts(SecondsFormat::Micros, true);
    json!({
        "name": format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            project, collection, doc.id
        ),
        "fields": doc.fields,
        "createTime": time,
        "updateTime": time,
    })
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": {"code": 503, "message": "unavailable"}})),
    )
        .into_response()
}

async fn firestore_create(
    State(state): State<Shared>,
    Path((project, _database, collection)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().await;
    if state.unavailable {
        return unavailable();
    }
    let fields = body.get("fields").cloned().unwrap_or_else(|| json!({}));
    let doc = state.insert(fields);
    Json(doc_json(&project, &collection, doc)).into_response()
}

async fn firestore_list(
    State(state): State<Shared>,
    Path((project, _database, collection)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().await;
    if state.unavailable {
        return unavailable();
    }

    let offset: usize = query
        .get("pageToken")
        .and_then(|t| t.parse().ok())
        .unwrap_or(0);
    let end = (offset + state.page_size).min(state.docs.len());
    if offset >= end {
        return Json(json!({})).into_response();
    }

    let documents: Vec<Value> = state.docs[offset..end]
        .iter()
        .map(|d| doc_json(&project, &collection, d))
        .collect();
    let mut body = json!({ "documents": documents });
    if end < state.docs.len() {
        body["nextPageToken"] = json!(end.to_string());
    }
    Json(body).into_response()
}

async fn firestore_delete(
    State(state): State<Shared>,
    Path((_project, _database, _collection, id)): Path<(String, String, String, String)>,
) -> Response {
    let mut state = state.lock().await;
    if state.unavailable {
        return unavailable();
    }
    state.delete_calls += 1;
    if state.fail_deletes.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "delete failed").into_response();
    }
    state.docs.retain(|d| d.id != id);
    Json(json!({})).into_response()
}

/// Minimal in-memory emulation of the Firestore v1 documents API
pub struct StubFirestore {
    addr: SocketAddr,
    state: Shared,
}

impl StubFirestore {
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(FirestoreState {
            docs: Vec::new(),
            next_id: 0,
            delete_calls: 0,
            fail_deletes: HashSet::new(),
            unavailable: false,
            page_size: 100,
        }));
        let app = Router::new()
            .route(
                "/v1/projects/:project/databases/:database/documents/:collection",
                get(firestore_list).post(firestore_create),
            )
            .route(
                "/v1/projects/:project/databases/:database/documents/:collection/:id",
                delete(firestore_delete),
            )
            .with_state(state.clone());

        Self {
            addr: serve(app).await,
            state,
        }
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            endpoint: format!("http://{}/v1", self.addr),
            project_id: "demo".to_string(),
            timeout_ms: 5000,
            ..Default::default()
        }
    }

    pub async fn insert_raw(&self, fields: Value) {
        self.state.lock().await.insert(fields);
    }

    pub async fn set_page_size(&self, size: usize) {
        self.state.lock().await.page_size = size;
    }

    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }

    pub async fn fail_delete(&self, id: &str) {
        self.state.lock().await.fail_deletes.insert(id.to_string());
    }

    pub async fn delete_calls(&self) -> usize {
        self.state.lock().await.delete_calls
    }
}

// ---------------------------------------------------------------------------
// In-process doubles
// ---------------------------------------------------------------------------

/// Provider that answers every request with the same result
pub struct StaticProvider {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn ok(translation: &str) -> Self {
        Self {
            reply: Some(translation.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for StaticProvider {
    async fn translate(&self, _text: &str, _languages: &LanguagePair) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "missing responseData".to_string(),
            })
    }
}

/// [`MemoryStore`] with switchable failures and a delete counter
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_append: bool,
    fail_list: bool,
    fail_deletes: std::sync::Mutex<HashSet<RecordId>>,
    delete_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_append(mut self) -> Self {
        self.fail_append = true;
        self
    }

    pub fn with_failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn fail_delete(&self, id: &RecordId) {
        self.fail_deletes.lock().unwrap().insert(id.clone());
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn down() -> StoreError {
        StoreError::Unavailable {
            message: "store offline".to_string(),
        }
    }
}

#[async_trait]
impl HistoryStore for FlakyStore {
    async fn append(&self, record: &NewRecord) -> StoreResult<RecordId> {
        if self.fail_append {
            return Err(Self::down());
        }
        self.inner.append(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<TranslationRecord>> {
        if self.fail_list {
            return Err(Self::down());
        }
        self.inner.list_all().await
    }

    async fn delete_one(&self, id: &RecordId) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.lock().unwrap().contains(id) {
            return Err(Self::down());
        }
        self.inner.delete_one(id).await
    }
}
