// Axum web server layer

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
    BoxError, Router,
};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod websocket;

use crate::auth::audit_logger::AuditLogger;
use crate::config::Config;
use crate::core::constants::routes;
use crate::core::errors::GateError;
use crate::gate::AuthGate;
use crate::metrics::GateMetrics;

/// JSON-RPC dispatcher sitting behind the gate
///
/// Receives payloads exactly as the client sent them. Returns `None` when there
/// is nothing to send back (notification-only payloads).
#[async_trait::async_trait]
pub trait RpcDispatcher: Send + Sync {
    async fn dispatch(&self, payload: Bytes) -> Result<Option<Bytes>, GateError>;
}

/// Application state containing all shared dependencies
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AuthGate>,
    pub dispatcher: Arc<dyn RpcDispatcher>,
    pub audit_logger: Arc<AuditLogger>,
    pub metrics: Arc<GateMetrics>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Arc<dyn RpcDispatcher>, metrics: Arc<GateMetrics>) -> Self {
        Self {
            gate: Arc::new(AuthGate::new(&config.gate)),
            dispatcher,
            audit_logger: Arc::new(AuditLogger::new(Some(metrics.clone()))),
            metrics,
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Request timeout (tower::timeout)
/// - Tracing (tower-http::trace)
/// - Body size limit (tower-http::limit)
/// - Gate middleware - exempt routes pass straight through
///
/// `/:version/rpc` only serves versions matching `/v<digits>/rpc`.
pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.body_size_limit_bytes;
    let timeout_secs = app_state.config.request_timeout_secs;

    let rpc = || post(handlers::rpc_handler).get(websocket::ws_handler);

    let router = Router::new()
        .route("/", rpc())
        .route("/rpc", rpc())
        .route("/:version/rpc", rpc())
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(routes::METRICS, get(handlers::metrics_handler))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            crate::auth::auth_middleware::auth_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::tracing_layer());

    // HandleErrorLayer must come before the timeout to catch its error
    let timeout_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            let status = if e.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        }))
        .timeout(Duration::from_secs(timeout_secs))
        .into_inner();

    router.layer(timeout_stack).with_state(app_state)
}
