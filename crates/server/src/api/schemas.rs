use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned after a successful relay.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AckResponse {
    /// Always `"ok"` on success.
    #[schema(example = "ok")]
    pub message: String,
    /// The parsed request body, echoed back.
    #[schema(value_type = Object)]
    pub contents: serde_json::Value,
}

/// Error payload returned for rejected or failed relays.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failed stage.
    pub message: String,
    /// Underlying error detail, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    /// Current relay metrics snapshot.
    pub metrics: MetricsResponse,
}

/// Relay metrics counters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// Webhook requests received.
    #[schema(example = 42)]
    pub received: u64,
    /// Requests rejected at the signature stage.
    #[schema(example = 2)]
    pub rejected_signature: u64,
    /// Requests rejected at payload validation.
    #[schema(example = 1)]
    pub rejected_payload: u64,
    /// Events successfully relayed downstream.
    #[schema(example = 39)]
    pub delivered: u64,
    /// Downstream deliveries that failed.
    #[schema(example = 0)]
    pub delivery_failed: u64,
}

/// Health status of one registered integration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntegrationHealth {
    /// Integration endpoint name.
    #[schema(example = "crm")]
    pub name: String,
    /// Whether the integration's health check passed.
    pub healthy: bool,
    /// Error detail when the health check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health status of all registered integrations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntegrationsHealthResponse {
    /// One entry per registered integration, sorted by name.
    pub integrations: Vec<IntegrationHealth>,
}
