// HTTP dispatcher forwarding allowed JSON-RPC payloads to the bundler

use crate::api::RpcDispatcher;
use crate::core::errors::GateError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Forwards payloads unchanged to the upstream JSON-RPC endpoint
///
/// Uses a pooled client; the upstream's reply body is relayed as-is, whatever
/// its HTTP status.
pub struct UpstreamDispatcher {
    http_client: Client,
    upstream_url: String,
}

impl UpstreamDispatcher {
    pub fn new(upstream_url: &str, timeout_secs: u64) -> Result<Self, GateError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(2))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                GateError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            upstream_url: upstream_url.to_string(),
        })
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }
}

#[async_trait]
impl RpcDispatcher for UpstreamDispatcher {
    async fn dispatch(&self, payload: Bytes) -> Result<Option<Bytes>, GateError> {
        debug!(url = %self.upstream_url, bytes = payload.len(), "Forwarding payload upstream");

        let response = self
            .http_client
            .post(&self.upstream_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.upstream_url, error = %e, "Upstream request failed");
                GateError::UpstreamError(format!("request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            GateError::UpstreamError(format!("failed to read response body: {}", e))
        })?;

        if !body.is_empty() {
            return Ok(Some(body));
        }
        if status.is_success() {
            Ok(None)
        } else {
            Err(GateError::UpstreamError(format!(
                "upstream returned {} with empty body",
                status
            )))
        }
    }
}
