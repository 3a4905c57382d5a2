// Prometheus metrics for gate decisions and WebSocket connections

use crate::core::errors::GateError;
use crate::core::models::Transport;
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

pub struct GateMetrics {
    registry: Registry,
    decisions: IntCounterVec,
    ws_connections: IntGauge,
}

impl GateMetrics {
    pub fn new() -> Result<Self, GateError> {
        let registry = Registry::new();

        let decisions = IntCounterVec::new(
            Opts::new("rpc_gate_decisions_total", "Gate decisions on RPC routes"),
            &["transport", "outcome"],
        )?;
        registry.register(Box::new(decisions.clone()))?;

        let ws_connections = IntGauge::new("rpc_gate_ws_connections", "Open WebSocket connections")?;
        registry.register(Box::new(ws_connections.clone()))?;

        Ok(Self {
            registry,
            decisions,
            ws_connections,
        })
    }

    /// `outcome` is one of "open", "allowed", "denied"
    pub fn record_decision(&self, transport: Transport, outcome: &str) {
        self.decisions
            .with_label_values(&[transport.as_str(), outcome])
            .inc();
    }

    pub fn decision_count(&self, transport: Transport, outcome: &str) -> u64 {
        self.decisions
            .with_label_values(&[transport.as_str(), outcome])
            .get()
    }

    pub fn ws_connection_opened(&self) {
        self.ws_connections.inc();
    }

    pub fn ws_connection_closed(&self) {
        self.ws_connections.dec();
    }

    pub fn open_ws_connections(&self) -> i64 {
        self.ws_connections.get()
    }

    /// Prometheus text exposition format
    pub fn render(&self) -> Result<String, GateError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| GateError::ConfigurationError(format!("Metrics output not UTF-8: {}", e)))
    }
}
