use super::{ApiError, ApiResult, AppState};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Open an SSE session.
///
/// The first event names the endpoint to POST to; every reply for the session
/// follows as a `message` event. Closing the connection ends the session.
pub async fn open_sse(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session = state.sessions.open();
    let endpoint = format!("{}?sessionId={}", state.endpoint, session.id);
    tracing::info!(session_id = %session.id, "SSE session opened");

    let stream = async_stream::stream! {
        let crate::sessions::OpenSession { id, mut messages, guard } = session;
        let _guard = guard;

        yield Ok(Event::default().event("endpoint").data(endpoint));

        while let Some(response) = messages.recv().await {
            match serde_json::to_string(&response) {
                Ok(json) => yield Ok(Event::default().event("message").data(json)),
                Err(e) => tracing::warn!(session_id = %id, error = %e, "Failed to serialize response"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Deliver one client message to its session
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MessageQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query.map_err(|e| {
        tracing::warn!(error = %e, "Malformed message query string");
        ApiError::MissingSessionId
    })?;
    let session_id = query
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingSessionId)?;

    let session = state
        .sessions
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound)?;

    let body = body.map_err(|e| {
        tracing::warn!(session_id = %session_id, error = %e, "Failed to read message body");
        ApiError::Internal
    })?;
    let message: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(session_id = %session_id, error = %e, "Failed to parse message body");
        ApiError::Internal
    })?;

    session.dispatch(message);

    Ok((StatusCode::ACCEPTED, "Accepted"))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
