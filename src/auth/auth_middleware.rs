// Axum gate middleware for HTTP requests

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::responses::ApiError;
use crate::api::AppState;
use crate::auth::audit_logger::AuthEvent;
use crate::core::models::Transport;
use crate::gate::credential;
use crate::gate::methods::MethodSet;
use crate::gate::route;
use crate::gate::validator::AuthDecision;

/// HTTP gate, run ahead of the RPC handler
///
/// Exempt routes pass straight through. On RPC routes the body is buffered,
/// judged as a whole, and either rejected with a single 401 envelope or handed
/// on unchanged.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // `Uri::path` never includes the query string
    if !route::is_rpc_path(request.uri().path()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, state.config.body_size_limit_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, path = %parts.uri.path(), "Failed to read request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let methods = MethodSet::from_slice(&bytes);
    let provided = credential::from_headers(&parts.headers);
    let requires_auth = state.gate.requires_auth(&methods);
    let decision = state.gate.evaluate(&methods, provided.as_deref());

    state.audit_logger.log_auth_event(
        Transport::Http,
        AuthEvent::from_decision(requires_auth, &decision),
        &methods,
        provided.as_deref(),
        extract_ip_address(&parts.headers).as_deref(),
    );

    match decision {
        AuthDecision::Denied(error) => ApiError::new(StatusCode::UNAUTHORIZED, error).into_response(),
        AuthDecision::Allowed => next.run(Request::from_parts(parts, Body::from(bytes))).await,
    }
}

/// Extract IP address from request headers
///
/// Checks `X-Forwarded-For` first (for proxied requests), then `X-Real-IP`.
pub(crate) fn extract_ip_address(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-Forwarded-For")
        .or_else(|| headers.get("X-Real-IP"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
