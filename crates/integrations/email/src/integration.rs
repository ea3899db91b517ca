use hookrelay_core::{IntegrationResponse, RegisterEvent};
use hookrelay_integration::{Integration, IntegrationError};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::EmailConfig;
use crate::error::EmailError;
use crate::types::{RecordEventRequest, UpsertContactRequest};

/// Marketing-email integration that upserts a contact and records a
/// registration event, which triggers the provider's welcome automation.
///
/// The event call only runs after a successful contact upsert; a contact
/// failure aborts the delivery with a stage-identifying error.
pub struct EmailIntegration {
    config: EmailConfig,
    client: Client,
}

impl EmailIntegration {
    /// Create a new email integration with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with the configured timeout.
    pub fn new(config: EmailConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new email integration with a custom HTTP client.
    pub fn with_client(config: EmailConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// `POST /contacts` -- upsert the contact for the registrant.
    async fn upsert_contact(&self, event: &RegisterEvent) -> Result<(), EmailError> {
        let request = UpsertContactRequest {
            email: event.details.email.clone(),
            first_name: event.details.first_name.clone(),
            last_name: event.details.last_name.clone(),
            user_id: event.auth_details.user_id.clone(),
        };

        debug!(email = %request.email, "upserting email contact");

        let response = self
            .client
            .post(self.api_url("contacts"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::Contact(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EmailError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Contact(format!("HTTP {status}: {body}")));
        }
        Ok(())
    }

    /// `POST /events` -- record the registration event for the contact.
    async fn record_event(&self, event: &RegisterEvent) -> Result<(), EmailError> {
        let request = RecordEventRequest {
            email: event.details.email.clone(),
            event_name: self.config.event_name.clone(),
        };

        debug!(email = %request.email, event_name = %request.event_name, "recording registration event");

        let response = self
            .client
            .post(self.api_url("events"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::Event(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EmailError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Event(format!("HTTP {status}: {body}")));
        }
        Ok(())
    }
}

impl Integration for EmailIntegration {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "email"
    }

    #[instrument(skip(self, event), fields(integration = "email", email = %event.details.email))]
    async fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> Result<IntegrationResponse, IntegrationError> {
        self.upsert_contact(event).await?;
        self.record_event(event).await?;

        debug!("email contact and registration event recorded");

        Ok(IntegrationResponse::success(serde_json::json!({
            "contact": event.details.email,
            "event": self.config.event_name,
        })))
    }

    #[instrument(skip(self), fields(integration = "email"))]
    async fn health_check(&self) -> Result<(), IntegrationError> {
        debug!(url = %self.config.base_url, "performing email API health check");

        let response = self
            .client
            .get(self.api_url("contacts"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| IntegrationError::Connection(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IntegrationError::RateLimited);
        }
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::Connection(format!(
                "health check failed: HTTP {status}: {body}"
            )));
        }
        Ok(())
    }
}
