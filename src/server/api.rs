//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::core::models::{DeleteReport, HistoryLoad, TranslationOutcome};
use crate::core::sync::DynSyncClient;

/// Application state
#[derive(Clone)]
pub struct AppState {
    client: DynSyncClient,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    languages: String,
}

/// Translation request
#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
}

/// Health check handler
async fn health_check(State(state): State<Arc<AppState>>) -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        languages: state.client.languages().to_string(),
    })
}

/// Translate and record
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> axum::Json<TranslationOutcome> {
    axum::Json(state.client.request_translation(&payload.text).await)
}

/// List saved translations
async fn history(State(state): State<Arc<AppState>>) -> axum::Json<HistoryLoad> {
    axum::Json(state.client.load_history().await)
}

/// Erase all saved translations
async fn erase_history(State(state): State<Arc<AppState>>) -> axum::Json<DeleteReport> {
    let report = state.client.erase_history().await;
    info!(
        "Erased history: {} attempted, {} failed",
        report.attempted, report.failed
    );
    axum::Json(report)
}

/// Build the API router around a sync client
pub fn router(client: DynSyncClient) -> Router {
    let state = Arc::new(AppState { client });

    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/history", get(history).delete(erase_history))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(client: DynSyncClient, host: String, port: u16) -> anyhow::Result<()> {
    let app = router(client);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
