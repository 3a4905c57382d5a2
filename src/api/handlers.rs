// Request handlers for API endpoints

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use tracing::{debug, error};

use crate::api::responses::{ApiError, HealthResponse};
use crate::api::AppState;
use crate::gate::route;

/// POST `/`, `/rpc`, `/v<digits>/rpc`
///
/// Reaches this point only after the gate middleware allowed the request.
/// The body is forwarded to the dispatcher untouched.
pub async fn rpc_handler(
    State(app_state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    if !route::is_rpc_path(uri.path()) {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    debug!(path = %uri.path(), bytes = body.len(), "Dispatching RPC request");

    let reply = app_state.dispatcher.dispatch(body).await.map_err(|e| {
        error!(error = %e, "RPC dispatch failed");
        ApiError::from(e)
    })?;

    Ok(match reply {
        Some(reply) => ([(header::CONTENT_TYPE, "application/json")], reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /health
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let gate = if app_state.gate.is_enabled() { "enabled" } else { "disabled" };

    Json(HealthResponse {
        status: "ok".to_string(),
        gate: gate.to_string(),
        protected_methods: app_state.gate.policy().len(),
    })
}

/// GET /metrics
///
/// Returns Prometheus metrics in text format
pub async fn metrics_handler(State(app_state): State<AppState>) -> Result<Response, ApiError> {
    let body = app_state.metrics.render().map_err(|e| {
        error!(error = %e, "Failed to render metrics");
        ApiError::from(e)
    })?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
