// Domain error types - no internal detail reaches the caller

use crate::core::constants::jsonrpc;
use crate::core::models::JsonRpcError;
use thiserror::Error;

/// Main error type for the gate
#[derive(Error, Debug)]
pub enum GateError {
    /// Protected method requested without the configured key (HTTP 401)
    #[error("Unauthorized access to protected RPC method")]
    Unauthorized,

    /// Dispatcher could not reach or read from the upstream bundler (HTTP 502)
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// Configuration error (HTTP 500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Metrics registry error (HTTP 500)
    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),
}

impl GateError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::Unauthorized => 401,
            GateError::UpstreamError(_) => 502,
            GateError::ConfigurationError(_) => 500,
            GateError::MetricsError(_) => 500,
        }
    }

    /// Get user-facing error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            GateError::Unauthorized => jsonrpc::UNAUTHORIZED_MESSAGE.to_string(),
            GateError::UpstreamError(_) => "Upstream unavailable".to_string(),
            GateError::ConfigurationError(_) => "Internal error".to_string(),
            GateError::MetricsError(_) => "Internal error".to_string(),
        }
    }

    /// JSON-RPC error object sent to the caller
    pub fn rpc_error(&self) -> JsonRpcError {
        let code = match self {
            GateError::Unauthorized => jsonrpc::ERROR_UNAUTHORIZED,
            _ => jsonrpc::ERROR_INTERNAL,
        };
        JsonRpcError {
            code,
            message: self.user_message(),
        }
    }
}
