//! Report delivery.

use crate::config::is_placeholder_webhook;
use crate::report::Report;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound for one webhook round-trip.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Body Slack incoming webhooks answer with on success.
const SUCCESS_BODY: &str = "ok";

/// Delivers reports somewhere a human will see them.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `report`. Returns `true` only on confirmed delivery; every
    /// failure is logged and reported as `false`, never raised.
    async fn send(&self, report: &Report) -> bool;
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Posts reports to a Slack-compatible incoming webhook.
pub struct SlackNotifier {
    /// Webhook and client; `None` when delivery is disabled.
    delivery: Option<(String, reqwest::Client)>,
    timeout: Duration,
}

impl SlackNotifier {
    /// Notifier for `webhook` with the default [`DELIVERY_TIMEOUT`].
    ///
    /// `None` or a placeholder disables delivery.
    pub fn new(webhook: Option<&str>) -> Self {
        Self::with_timeout(webhook, DELIVERY_TIMEOUT)
    }

    /// Notifier whose webhook round-trips give up after `timeout`.
    ///
    /// An HTTP client that cannot be built disables delivery instead of
    /// failing the run.
    pub fn with_timeout(webhook: Option<&str>, timeout: Duration) -> Self {
        let webhook = webhook.filter(|url| !is_placeholder_webhook(url));
        let delivery = webhook.and_then(|url| {
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => Some((url.to_string(), client)),
                Err(e) => {
                    warn!("Cannot build HTTP client, notifications disabled: {}", e);
                    None
                }
            }
        });
        Self { delivery, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.delivery.is_some()
    }

    async fn post(
        &self,
        client: &reqwest::Client,
        webhook: &str,
        text: &str,
    ) -> Result<(), String> {
        let response = client
            .post(webhook)
            .json(&WebhookMessage { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    format!("timed out after {:?}", self.timeout)
                } else {
                    e.to_string()
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        debug!("Webhook answered {}: {}", status, body);

        if status.is_success() && body.trim() == SUCCESS_BODY {
            Ok(())
        } else {
            Err(format!("unexpected response {}: {}", status, body.trim()))
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, report: &Report) -> bool {
        let text = report.render();

        let Some((webhook, client)) = &self.delivery else {
            info!("Notifications not configured; report not sent:\n{}", text);
            return false;
        };

        match self.post(client, webhook, &text).await {
            Ok(()) => {
                info!("Report delivered");
                true
            }
            Err(reason) => {
                warn!("Failed to deliver report: {}", reason);
                false
            }
        }
    }
}
