use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response from a downstream integration after relaying an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IntegrationResponse {
    /// Status of the delivery.
    pub status: ResponseStatus,
    /// Integration-specific response body.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub body: serde_json::Value,
    /// Optional headers or metadata from the downstream API.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl IntegrationResponse {
    /// Create a successful integration response.
    #[must_use]
    pub fn success(body: serde_json::Value) -> Self {
        Self {
            status: ResponseStatus::Success,
            body,
            headers: HashMap::new(),
        }
    }

    /// Create a failed integration response.
    #[must_use]
    pub fn failure(body: serde_json::Value) -> Self {
        Self {
            status: ResponseStatus::Failure,
            body,
            headers: HashMap::new(),
        }
    }
}

/// Status of a downstream delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Failure,
}
