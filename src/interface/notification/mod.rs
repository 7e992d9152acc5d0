use std::time::Duration;

use reqwest::Client;

use crate::shared::error::NotificationError;
use crate::shared::ports::notification::{NotificationFuture, NotificationPort, Severity};

#[derive(Clone, Debug, Default)]
pub struct NoopNotification;

impl NoopNotification {
    /// Creates a new no-op notification sink.
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPort for NoopNotification {
    fn show(&self, _title: String, _subtitle: String, _severity: Severity) -> NotificationFuture {
        Box::pin(async move { Ok(()) })
    }
}

/// Posts each notification as JSON to a configured HTTP endpoint.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String, timeout: Duration) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Failed(e.to_string()))?;
        Ok(Self { client, url })
    }

    fn push(&self, payload: serde_json::Value) -> NotificationFuture {
        let client = self.client.clone();
        let url = self.url.clone();
        Box::pin(async move {
            let resp = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| NotificationError::Failed(e.to_string()))?;

            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            if !status.is_success() {
                return Err(NotificationError::Failed(format!(
                    "webhook push failed {}: {}",
                    status, body
                )));
            }
            Ok(())
        })
    }
}

impl NotificationPort for WebhookNotifier {
    fn show(&self, title: String, subtitle: String, severity: Severity) -> NotificationFuture {
        self.push(serde_json::json!({
            "title": title,
            "subtitle": subtitle,
            "severity": severity,
            "ts": chrono::Utc::now().to_rfc3339(),
        }))
    }
}
