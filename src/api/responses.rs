// Response types for the gate and its endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::core::constants::jsonrpc;
use crate::core::errors::GateError;
use crate::core::models::JsonRpcError;

/// `{"jsonrpc":"2.0","id":null,"error":{...}}`
///
/// Used for whole-request rejections, so the id is always null, including
/// for batches.
#[derive(Debug, Clone, Serialize)]
pub struct RpcErrorEnvelope {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    pub error: JsonRpcError,
}

impl RpcErrorEnvelope {
    pub fn new(error: JsonRpcError) -> Self {
        Self {
            jsonrpc: jsonrpc::VERSION,
            id: None,
            error,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub gate: String,
    pub protected_methods: usize,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: JsonRpcError,
}

impl ApiError {
    pub fn new(status: StatusCode, error: JsonRpcError) -> Self {
        Self { status, error }
    }

    /// 401 with the fixed unauthorized error
    pub fn unauthorized() -> Self {
        GateError::Unauthorized.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(RpcErrorEnvelope::new(self.error))).into_response()
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            error: err.rpc_error(),
        }
    }
}
