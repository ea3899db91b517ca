use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event type discriminator sent by the identity provider.
///
/// Modeled as an enum so that deserialization rejects any value outside the
/// allow-list. This endpoint family accepts exactly one event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EventType {
    /// A user completed self-registration.
    #[serde(rename = "access.REGISTER")]
    Register,
}

impl EventType {
    /// Returns the wire representation of the event type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "access.REGISTER",
        }
    }
}

/// Authentication context attached to a registration event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthDetails {
    /// Identity-provider user id of the newly registered user.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// IP address the registration request originated from.
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
}

/// Registration form fields captured by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegistrationDetails {
    /// Email address the user registered with.
    pub email: String,

    /// First name, when the registration form collected one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name, when the registration form collected one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Upstream identity provider (e.g. `google`) for federated signups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider: Option<String>,
}

/// A user-registration notification from the identity provider.
///
/// Constructed transiently from the raw request body of a signed webhook
/// delivery; never persisted. Field names match the provider's wire format
/// exactly -- the raw body is what gets signed, so this type must round-trip
/// without renaming surprises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "time": 1714670000000_i64,
    "type": "access.REGISTER",
    "authDetails": {"userId": "8f7c...", "ipAddress": "203.0.113.7"},
    "details": {"email": "user@example.com", "first_name": "Ada"}
})))]
pub struct RegisterEvent {
    /// Event timestamp in epoch milliseconds.
    pub time: i64,

    /// Event type; must be `access.REGISTER`.
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Authentication context.
    #[serde(rename = "authDetails")]
    pub auth_details: AuthDetails,

    /// Registration form fields.
    pub details: RegistrationDetails,
}

impl RegisterEvent {
    /// The event timestamp as a UTC datetime, or `None` if `time` falls
    /// outside the representable range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// Display name derived from the registration details: first and last
    /// name joined when present, otherwise the local part of the email.
    pub fn display_name(&self) -> String {
        let first = self.details.first_name.as_deref().unwrap_or("");
        let last = self.details.last_name.as_deref().unwrap_or("");
        let full = format!("{first} {last}");
        let full = full.trim();
        if full.is_empty() {
            self.details
                .email
                .split('@')
                .next()
                .unwrap_or(&self.details.email)
                .to_owned()
        } else {
            full.to_owned()
        }
    }
}
