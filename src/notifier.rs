//! Delivery notifier: hands the finished report to the email workflow.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::WebhookConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook responded with status {0}")]
    Status(u16),
}

/// Body posted to the email workflow.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub order_number: String,
    pub student_name: String,
    pub student_email: String,
    pub plan_type: String,
    pub pdf_base64: String,
    pub password: String,
    /// RFC 3339 timestamp of generation.
    pub report_date: String,
}

impl std::fmt::Debug for DeliveryPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryPayload")
            .field("order_number", &self.order_number)
            .field("student_name", &self.student_name)
            .field("student_email", &self.student_email)
            .field("plan_type", &self.plan_type)
            .field("pdf_base64_len", &self.pdf_base64.len())
            .field("report_date", &self.report_date)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait DeliveryNotifier: Send + Sync {
    async fn send(&self, payload: &DeliveryPayload) -> Result<(), NotifyError>;
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            url: config.url,
        }
    }

    pub fn build_client() -> Result<reqwest::Client, NotifyError> {
        Ok(reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .timeout(Duration::from_secs(60))
            .user_agent("isis-report-server/1.0")
            .build()?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DeliveryNotifier for WebhookNotifier {
    async fn send(&self, payload: &DeliveryPayload) -> Result<(), NotifyError> {
        log::info!(
            "Sending report for order {} to {}",
            payload.order_number,
            self.url
        );

        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!(
                "Webhook rejected report for order {} with status {}",
                payload.order_number,
                status
            );
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}
