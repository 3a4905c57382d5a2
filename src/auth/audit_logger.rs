// Security event logging for gate decisions

use crate::auth::api_key::ApiKeyHash;
use crate::core::models::Transport;
use crate::gate::methods::MethodSet;
use crate::gate::validator::AuthDecision;
use crate::metrics::GateMetrics;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication event type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// No protected method involved; no key was checked
    Open,
    AuthSuccess,
    AuthFailure,
}

impl AuthEvent {
    pub fn from_decision(requires_auth: bool, decision: &AuthDecision) -> Self {
        match (requires_auth, decision.is_allowed()) {
            (_, false) => AuthEvent::AuthFailure,
            (true, true) => AuthEvent::AuthSuccess,
            (false, true) => AuthEvent::Open,
        }
    }

    /// Metrics label
    pub fn outcome(&self) -> &'static str {
        match self {
            AuthEvent::Open => "open",
            AuthEvent::AuthSuccess => "allowed",
            AuthEvent::AuthFailure => "denied",
        }
    }
}

/// Audit logger for gate decisions
///
/// Keys are only ever logged as SHA-256 fingerprints.
pub struct AuditLogger {
    metrics: Option<Arc<GateMetrics>>,
}

impl AuditLogger {
    /// If `metrics` is `None`, only structured logging is performed.
    pub fn new(metrics: Option<Arc<GateMetrics>>) -> Self {
        Self { metrics }
    }

    pub fn log_auth_event(
        &self,
        transport: Transport,
        event: AuthEvent,
        methods: &MethodSet,
        provided_key: Option<&str>,
        ip_address: Option<&str>,
    ) {
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(transport, event.outcome());
        }

        match event {
            AuthEvent::Open => {
                debug!(
                    transport = %transport,
                    method_count = methods.len(),
                    "RPC request needs no authentication"
                );
            }
            AuthEvent::AuthSuccess => {
                info!(
                    transport = %transport,
                    method_count = methods.len(),
                    api_key_hash = %fingerprint(provided_key),
                    ip_address = ?ip_address,
                    "Authentication successful"
                );
            }
            AuthEvent::AuthFailure => {
                warn!(
                    transport = %transport,
                    methods = ?methods.as_slice(),
                    api_key_hash = %fingerprint(provided_key),
                    ip_address = ?ip_address,
                    "Authentication failed"
                );
            }
        }
    }
}

fn fingerprint(provided_key: Option<&str>) -> String {
    provided_key
        .map(|key| ApiKeyHash::from_api_key(key).to_string())
        .unwrap_or_else(|| "none".to_string())
}
