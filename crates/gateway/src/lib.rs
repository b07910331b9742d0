//! HTTP API gateway for Askhound.
//!
//! Exposes the question-answering REST surface: `POST /ask` for queries,
//! `GET /health` for liveness checks, and `GET /` for service info.
//!
//! Built on Axum for high performance async HTTP.

pub mod sessions;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use askhound_agent::QueryAgent;
use askhound_completion::AzureOpenAiClient;
use askhound_config::AppConfig;
use askhound_core::HistoryEntry;
use askhound_store::DocumentStore;
use sessions::SessionStore;

// ── State ─────────────────────────────────────────────────────────────────

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: QueryAgent,
    pub sessions: SessionStore,
}

pub type SharedState = Arc<GatewayState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Permissive CORS (the API is meant to be called from anywhere)
/// - Request body size limit (1 MiB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ask", post(ask_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Loads the document corpus, builds the completion client and agent,
/// then serves until the process is stopped.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let store = DocumentStore::new();
    let loaded = store.load(Path::new(&config.documents.dir)).await;
    info!(count = loaded, dir = %config.documents.dir, "Document corpus ready");

    if !config.completion.is_configured() {
        warn!("Azure OpenAI endpoint or key not set — /ask will fail until configured");
    }

    let client = Arc::new(
        AzureOpenAiClient::new(
            &config.completion.endpoint,
            &config.completion.api_key,
            &config.completion.deployment,
        )
        .with_api_version(&config.completion.api_version),
    );

    let agent = QueryAgent::new(Arc::new(store), client, &config.completion.deployment)
        .with_temperature(config.completion.temperature)
        .with_max_tokens(config.completion.max_tokens);

    let state = Arc::new(GatewayState {
        agent,
        sessions: SessionStore::new(),
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct AskRequest {
    /// The question to answer.
    query: String,
    /// Existing session id (omit to start a new session).
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct AskResponse {
    answer: String,
    source_documents: Vec<String>,
    session_id: String,
}

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Askhound",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /ask": "Ask a question about the document corpus",
            "GET /health": "Health check",
        },
    }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

async fn ask_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = state.sessions.resolve(payload.session_id).await;
    let history = state.sessions.history(&session_id).await;

    info!(session = %session_id, query_len = payload.query.len(), "ask request");

    let package = state
        .agent
        .answer(&payload.query, &history, &session_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Query failed: {e}"),
                }),
            )
        })?;

    state
        .sessions
        .append(
            &session_id,
            HistoryEntry::new(&payload.query, &package.answer),
        )
        .await;

    Ok(Json(AskResponse {
        answer: package.answer,
        source_documents: package.sources,
        session_id: package.session_id,
    }))
}

// ── Tests ─────────────────────────────────────────────────────────────────
