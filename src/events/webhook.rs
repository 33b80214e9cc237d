//! Outbound webhook delivery.
//!
//! Webhook URLs come from task metadata; delivery is best-effort with a
//! per-request timeout. The client sits behind a trait so tests and embedders
//! can substitute their own transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

/// Errors from a single webhook delivery attempt. These are logged by the
/// dispatcher and never propagated to the mutating caller.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook endpoint returned status {0}")]
    Status(u16),
}

/// Transport for webhook deliveries.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// POST a JSON body to the given URL with `Content-Type: application/json`.
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), WebhookError>;
}

/// Production webhook client backed by `reqwest`.
pub struct HttpWebhookClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpWebhookClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }
        Ok(())
    }
}
