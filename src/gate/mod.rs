// Authorization gate for protected JSON-RPC methods
//
// Route matcher -> method extractor -> protection policy -> credential -> validator.
// Transports live in `auth::auth_middleware` (HTTP) and `api::websocket`.

pub mod credential;
pub mod methods;
pub mod policy;
pub mod route;
pub mod validator;

use crate::auth::api_key::ApiKey;
use crate::config::GateConfig;
use methods::MethodSet;
use policy::ProtectionPolicy;
use validator::AuthDecision;

/// Immutable gate built once from configuration and shared across requests
/// and connections.
#[derive(Debug)]
pub struct AuthGate {
    api_key: Option<ApiKey>,
    policy: ProtectionPolicy,
}

impl AuthGate {
    /// An absent or empty key disables the gate regardless of the protected set.
    pub fn new(config: &GateConfig) -> Self {
        Self {
            api_key: config
                .api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .map(ApiKey::new),
            policy: ProtectionPolicy::new(config.protected_methods.iter().cloned()),
        }
    }

    pub fn disabled() -> Self {
        Self {
            api_key: None,
            policy: ProtectionPolicy::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn policy(&self) -> &ProtectionPolicy {
        &self.policy
    }

    /// True when the gate is on and the request names a protected method
    pub fn requires_auth(&self, methods: &MethodSet) -> bool {
        self.is_enabled() && self.policy.requires_auth(methods)
    }

    pub fn evaluate(&self, methods: &MethodSet, provided: Option<&str>) -> AuthDecision {
        validator::validate(
            self.policy.requires_auth(methods),
            self.api_key.as_ref(),
            provided,
        )
    }
}
