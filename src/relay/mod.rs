pub mod credential;
pub mod intake;
pub mod log;

use std::sync::Arc;

use crate::config::IntakeCredentials;
use crate::error::RelayError;
use crate::submission::{fields, parser};

use intake::Intake;
use log::RelayLog;

/// Successful relay result: the intake endpoint's body, passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    pub body: String,
}

/// Validates contact submissions and forwards them to the intake endpoint.
///
/// Holds no mutable state; every call to [`Relay::submit`] is independent and
/// makes at most one outbound request.
pub struct Relay {
    credentials: IntakeCredentials,
    intake: Arc<dyn Intake>,
    log: Arc<dyn RelayLog>,
}

impl Relay {
    pub fn new(
        credentials: IntakeCredentials,
        intake: Arc<dyn Intake>,
        log: Arc<dyn RelayLog>,
    ) -> Self {
        Self {
            credentials,
            intake,
            log,
        }
    }

    pub async fn submit(
        &self,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<RelayOutcome, RelayError> {
        let result = self.forward(content_type, body).await;
        if let Err(ref e) = result {
            self.log.failure(e);
        }
        result
    }

    async fn forward(
        &self,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<RelayOutcome, RelayError> {
        let raw = parser::parse_body(content_type, body).map_err(RelayError::MalformedRequest)?;

        let (submission, schema) =
            fields::extract(&raw).map_err(|missing| RelayError::MissingRequiredFields { missing })?;
        tracing::debug!("Contact submission accepted ({schema:?} schema)");

        let authorization = credential::resolve(&self.credentials)?;

        let resp = self
            .intake
            .deliver(&authorization, &submission.to_payload())
            .await
            .map_err(|e| RelayError::Internal(e.message))?;

        if !resp.status.is_success() {
            return Err(RelayError::UpstreamRejected {
                status: resp.status,
                body: resp.body,
            });
        }

        tracing::info!("Contact submission forwarded ({})", resp.status);
        Ok(RelayOutcome { body: resp.body })
    }
}
