use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode};
use reqwest::Url;

use crate::submission::IntakePayload;

/// Raw upstream reply, status and body untouched.
#[derive(Debug, Clone)]
pub struct IntakeResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug)]
pub struct IntakeError {
    pub message: String,
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for IntakeError {
    fn from(s: String) -> Self {
        IntakeError { message: s }
    }
}

/// Delivery of a submission to the external intake system.
#[async_trait]
pub trait Intake: Send + Sync {
    async fn deliver(
        &self,
        authorization: &HeaderValue,
        payload: &IntakePayload<'_>,
    ) -> Result<IntakeResponse, IntakeError>;
}

/// Posts submissions as JSON to a webhook URL.
pub struct WebhookIntake {
    client: reqwest::Client,
    url: Url,
}

impl WebhookIntake {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Intake for WebhookIntake {
    async fn deliver(
        &self,
        authorization: &HeaderValue,
        payload: &IntakePayload<'_>,
    ) -> Result<IntakeResponse, IntakeError> {
        // One attempt, transport default timeouts
        let resp = self
            .client
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .header("Authorization", authorization.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| IntakeError::from(format!("Webhook request failed: {}", e.without_url())))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| IntakeError::from(format!("Failed to read webhook response: {}", e.without_url())))?;

        Ok(IntakeResponse { status, body })
    }
}
