//! HTTP dashboard server.
//!
//! Serves the embedded dashboard page plus a small JSON API: credential
//! set/clear/status and the rendered report. The credential holder lives
//! here with an explicit lifecycle; nothing is persisted across restarts.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::LoadError;
use crate::formatters;
use crate::loader::Loader;
use crate::views::ImpactReport;

/// Embedded dashboard page.
const INDEX_HTML: &str = include_str!("index.html");

/// Shared server state: the loader (which owns the memo) and the
/// operator's credential. Single writer; the credential endpoints are the
/// only mutators.
pub struct AppState {
    /// Data loader.
    loader: Loader,

    /// Organization shown on the report.
    organization: String,

    /// Operator-supplied API key, absent until submitted.
    credential: RwLock<Option<String>>,
}

impl AppState {
    /// Create server state, optionally pre-seeding the credential (e.g.
    /// from the environment).
    #[must_use]
    pub fn new(loader: Loader, organization: String, initial_key: Option<String>) -> Self {
        let initial_key = initial_key.filter(|k| Loader::validate_credential(k));
        Self { loader, organization, credential: RwLock::new(initial_key) }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("organization", &self.organization).finish_non_exhaustive()
    }
}

/// Build the application router.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/api/credential",
            get(credential_status).post(submit_credential).delete(clear_credential),
        )
        .route("/api/report", get(report))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the router until ctrl-c.
///
/// # Errors
///
/// Returns error on bind or server failure.
pub async fn run(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Dashboard shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}

/// Credential submission body.
#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    /// The Dimensions API key.
    pub api_key: String,
}

/// Credential status payload. Never echoes the key.
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    /// Whether a credential is currently held.
    pub active: bool,
}

/// Error payload for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Classification tag.
    pub error: &'static str,

    /// Operator-facing message.
    pub message: String,
}

/// Output format for the report endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Machine-readable JSON.
    #[default]
    Json,
    /// Human-readable Markdown.
    Markdown,
}

/// Query parameters for the report endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Requested output format.
    #[serde(default)]
    pub format: ReportFormat,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn credential_status(State(state): State<Arc<AppState>>) -> Json<CredentialStatus> {
    let active = state.credential.read().await.is_some();
    Json(CredentialStatus { active })
}

async fn submit_credential(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialRequest>,
) -> Response {
    if !Loader::validate_credential(&request.api_key) {
        return load_error_response(&LoadError::BlankCredential);
    }

    *state.credential.write().await = Some(request.api_key);
    tracing::info!("Credential submitted");

    (StatusCode::OK, Json(CredentialStatus { active: true })).into_response()
}

async fn clear_credential(State(state): State<Arc<AppState>>) -> Json<CredentialStatus> {
    *state.credential.write().await = None;
    tracing::info!("Credential cleared");

    Json(CredentialStatus { active: false })
}

async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    let Some(api_key) = state.credential.read().await.clone() else {
        return load_error_response(&LoadError::BlankCredential);
    };

    let tables = match state.loader.load(&api_key).await {
        Ok(tables) => tables,
        Err(err) => return load_error_response(&err),
    };

    let report = ImpactReport::build(&tables, &state.organization, chrono::Utc::now());

    match query.format {
        ReportFormat::Json => Json(formatters::compact_report(&report)).into_response(),
        ReportFormat::Markdown => (
            [(axum::http::header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            formatters::format_report_markdown(&report),
        )
            .into_response(),
    }
}

/// Map a classified load failure onto an HTTP status and error payload.
fn load_error_response(err: &LoadError) -> Response {
    let status = match err {
        LoadError::BlankCredential => StatusCode::BAD_REQUEST,
        LoadError::Auth { .. } => StatusCode::UNAUTHORIZED,
        LoadError::Connectivity { .. } => StatusCode::BAD_GATEWAY,
        LoadError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorBody { error: err.kind(), message: err.to_user_message() })).into_response()
}
