//! Webhook notification delivery.
//!
//! The notifier performs a single outbound POST and never raises: every
//! outcome, including transport failure, comes back as a
//! [`NotificationResult`] that the caller persists as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of one notification attempt. Serializes to the exact shape
/// stored in `webhook_response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationResult {
    /// The endpoint answered; any HTTP status counts as delivered.
    Delivered {
        status: u16,
        #[serde(rename = "statusText")]
        status_text: String,
        timestamp: DateTime<Utc>,
    },
    /// The request never completed (connect error, timeout, DNS, ...).
    Failed {
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl NotificationResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationResult::Delivered { .. })
    }

    /// The JSON document persisted into the job record.
    pub fn to_json(&self) -> Value {
        match self {
            NotificationResult::Delivered {
                status,
                status_text,
                timestamp,
            } => json!({
                "status": status,
                "statusText": status_text,
                "timestamp": timestamp,
            }),
            NotificationResult::Failed { error, timestamp } => json!({
                "error": error,
                "timestamp": timestamp,
            }),
        }
    }
}

/// Posts notification documents to a single configured endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl WebhookNotifier {
    /// Bound on each notification request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver `document` to the endpoint. Infallible by contract: a
    /// transport failure is data, not an error.
    pub async fn notify(&self, document: &Value) -> NotificationResult {
        let sent = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(document)
            .send()
            .await;

        match sent {
            Ok(response) => {
                let status = response.status();
                info!(endpoint = %self.endpoint, status = %status, "webhook delivered");
                NotificationResult::Delivered {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or("").to_string(),
                    timestamp: Utc::now(),
                }
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "webhook delivery failed");
                NotificationResult::Failed {
                    error: err.to_string(),
                    timestamp: Utc::now(),
                }
            }
        }
    }
}
