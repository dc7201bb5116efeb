//! HTTP adapter for an external skin rendering engine.
//!
//! The engine receives [`crate::EnginePayload`] as a JSON `POST` body and
//! answers with the encoded image. Any non-success status is surfaced as
//! [`Error::RenderError`] with the engine's own message attached.

use std::time::Duration;

use futures::future::BoxFuture;
use log::{debug, warn};
use reqwest::Client;

use crate::{Error, GatewayConfig, RenderGateway, RenderOptions, Result};

/// Render backend that forwards requests to a remote engine.
pub struct HttpRenderGateway {
    client: Client,
    endpoint: String,
    timeout_ms: u64,
}

impl HttpRenderGateway {
    pub fn new(endpoint: &str, config: &GatewayConfig) -> Result<Self> {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::ConfigError(format!(
                "engine url must be http(s), got {endpoint}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn render_remote(&self, options: RenderOptions) -> Result<Vec<u8>> {
        let payload = options.engine_payload();
        debug!("POST {} skin={}", self.endpoint, payload.skin);

        let res = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = body.trim();
            warn!("engine answered {} for skin {}", status, options.skin_resource_name);
            return Err(Error::RenderError(if message.is_empty() {
                format!("engine returned {}", status)
            } else {
                format!("engine returned {}: {}", status, message)
            }));
        }

        let bytes = res.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            Error::NetworkError(format!("engine request failed: {}", err))
        }
    }
}

impl RenderGateway for HttpRenderGateway {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn render(&self, options: RenderOptions) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(self.render_remote(options))
    }
}
