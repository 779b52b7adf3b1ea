use crate::config::{ServerConfig, SSE_PATH};
use crate::sessions::SessionManager;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use folo_mcp::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;

/// Largest accepted POST body
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

/// Shared state for the HTTP binding
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub endpoint: String,
}

impl AppState {
    pub fn new(registry: Arc<ToolRegistry>, endpoint: impl Into<String>) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(registry)),
            endpoint: endpoint.into(),
        }
    }
}

/// Start the HTTP/SSE server and run until Ctrl-C
pub async fn serve(config: &ServerConfig, registry: Arc<ToolRegistry>) -> Result<()> {
    let state = Arc::new(AppState::new(registry, config.endpoint.clone()));
    let sessions = state.sessions.clone();

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "MCP server listening on http://{} (SSE: {}, messages: {})",
        addr,
        SSE_PATH,
        config.endpoint
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            let closed = sessions.close_all();
            tracing::info!("Shutting down, closed {} session(s)", closed);
        })
        .await?;

    Ok(())
}

/// Create the router: the SSE endpoint, the message endpoint and a JSON 404
/// for everything else
pub fn create_router(state: Arc<AppState>) -> Router {
    let endpoint = state.endpoint.clone();

    Router::new()
        .route(SSE_PATH, get(handlers::open_sse).fallback(handlers::not_found))
        .route(
            &endpoint,
            post(handlers::post_message).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Failures of the HTTP binding itself; protocol errors travel over SSE
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing sessionId")]
    MissingSessionId,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSessionId => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
