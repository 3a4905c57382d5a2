// Validator - allow/deny decision for one request or message

use crate::auth::api_key::ApiKey;
use crate::core::errors::GateError;
use crate::core::models::JsonRpcError;

/// Outcome of evaluating the gate. Pure value with no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allowed,
    Denied(JsonRpcError),
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthDecision::Allowed)
    }

    pub fn error(&self) -> Option<&JsonRpcError> {
        match self {
            AuthDecision::Allowed => None,
            AuthDecision::Denied(error) => Some(error),
        }
    }

    pub fn denied() -> Self {
        AuthDecision::Denied(GateError::Unauthorized.rpc_error())
    }
}

/// `allowed = !requires_auth || provided == configured`.
///
/// With no configured key the gate is off and everything is allowed. Missing
/// and wrong keys produce the same error.
pub fn validate(requires_auth: bool, configured: Option<&ApiKey>, provided: Option<&str>) -> AuthDecision {
    let Some(configured) = configured else {
        return AuthDecision::Allowed;
    };
    if !requires_auth {
        return AuthDecision::Allowed;
    }
    match provided {
        Some(key) if configured.matches(key) => AuthDecision::Allowed,
        _ => AuthDecision::denied(),
    }
}
