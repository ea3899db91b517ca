use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while delivering an event to a downstream
/// integration.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The downstream API rejected or failed the call.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// The downstream API did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The integration was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The downstream API rejected the request due to rate limiting.
    #[error("rate limited")]
    RateLimited,

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl IntegrationError {
    /// Returns `true` if the error is transient and the delivery might
    /// succeed if the identity provider re-sends the event.
    ///
    /// The relay itself never retries; this is informational for callers
    /// and logs.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::Connection(_) | Self::RateLimited
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(IntegrationError::Timeout(Duration::from_secs(10)).is_retryable());
        assert!(IntegrationError::Connection("reset".into()).is_retryable());
        assert!(IntegrationError::RateLimited.is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!IntegrationError::DeliveryFailed("x".into()).is_retryable());
        assert!(!IntegrationError::Configuration("x".into()).is_retryable());
        assert!(!IntegrationError::Serialization("x".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = IntegrationError::DeliveryFailed("unable to create person record".into());
        assert_eq!(
            err.to_string(),
            "delivery failed: unable to create person record"
        );

        let err = IntegrationError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "timeout after 500ms");

        let err = IntegrationError::RateLimited;
        assert_eq!(err.to_string(), "rate limited");
    }
}
