use hookrelay_core::{IntegrationResponse, RegisterEvent};
use hookrelay_integration::{Integration, IntegrationError};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::CrmConfig;
use crate::error::CrmError;
use crate::types::{CreateDealRequest, CreatePersonRequest, CreatedRecord};

/// CRM integration that records each registration as a person plus an
/// associated deal.
///
/// The two calls are strictly sequential: the deal references the created
/// person's id, so when person creation fails the deal call is never
/// attempted and the error identifies the failed stage.
pub struct CrmIntegration {
    config: CrmConfig,
    client: Client,
}

impl CrmIntegration {
    /// Create a new CRM integration with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with the configured timeout.
    pub fn new(config: CrmConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new CRM integration with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool across
    /// integrations.
    pub fn with_client(config: CrmConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// `POST /persons` -- create the person record for the registrant.
    async fn create_person(&self, event: &RegisterEvent) -> Result<i64, CrmError> {
        let request = CreatePersonRequest {
            name: event.display_name(),
            email: event.details.email.clone(),
        };

        debug!(email = %request.email, "creating CRM person record");

        let response = self
            .client
            .post(self.api_url("persons"))
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| CrmError::Person(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CrmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Person(format!("HTTP {status}: {body}")));
        }

        let record: CreatedRecord = response
            .json()
            .await
            .map_err(|e| CrmError::Person(format!("invalid response body: {e}")))?;
        Ok(record.id)
    }

    /// `POST /deals` -- create the deal referencing an existing person.
    async fn create_deal(&self, person_id: i64, event: &RegisterEvent) -> Result<i64, CrmError> {
        let request = CreateDealRequest {
            title: format!("{}: {}", self.config.deal_title_prefix, event.details.email),
            person_id,
        };

        debug!(person_id, "creating CRM deal record");

        let response = self
            .client
            .post(self.api_url("deals"))
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| CrmError::Deal(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CrmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Deal(format!("HTTP {status}: {body}")));
        }

        let record: CreatedRecord = response
            .json()
            .await
            .map_err(|e| CrmError::Deal(format!("invalid response body: {e}")))?;
        Ok(record.id)
    }
}

impl Integration for CrmIntegration {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "crm"
    }

    #[instrument(skip(self, event), fields(integration = "crm", email = %event.details.email))]
    async fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> Result<IntegrationResponse, IntegrationError> {
        let person_id = self.create_person(event).await?;
        let deal_id = self.create_deal(person_id, event).await?;

        debug!(person_id, deal_id, "CRM records created");

        Ok(IntegrationResponse::success(serde_json::json!({
            "person_id": person_id,
            "deal_id": deal_id,
        })))
    }

    #[instrument(skip(self), fields(integration = "crm"))]
    async fn health_check(&self) -> Result<(), IntegrationError> {
        debug!(url = %self.config.base_url, "performing CRM health check");

        let response = self
            .client
            .get(self.api_url("persons"))
            .bearer_auth(&self.config.api_token)
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
