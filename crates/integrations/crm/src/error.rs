use hookrelay_integration::IntegrationError;
use thiserror::Error;

/// Errors specific to the CRM integration.
///
/// These are internal errors that get converted into [`IntegrationError`] at
/// the public API boundary. The person/deal split identifies which call of
/// the two-step sequence failed.
#[derive(Debug, Error)]
pub enum CrmError {
    /// The person-record creation call failed.
    #[error("unable to create person record: {0}")]
    Person(String),

    /// The deal-record creation call failed.
    #[error("unable to create deal record: {0}")]
    Deal(String),

    /// The CRM API returned HTTP 429 (Too Many Requests).
    #[error("rate limited by CRM API")]
    RateLimited,
}

impl From<CrmError> for IntegrationError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::Person(_) | CrmError::Deal(_) => {
                IntegrationError::DeliveryFailed(err.to_string())
            }
            CrmError::RateLimited => IntegrationError::RateLimited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_error_identifies_stage() {
        let err: IntegrationError = CrmError::Person("HTTP 500".into()).into();
        assert!(err.to_string().contains("unable to create person record"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn deal_error_identifies_stage() {
        let err: IntegrationError = CrmError::Deal("HTTP 400".into()).into();
        assert!(err.to_string().contains("unable to create deal record"));
    }

    #[test]
    fn rate_limited_maps_to_retryable() {
        let err: IntegrationError = CrmError::RateLimited.into();
        assert!(err.is_retryable());
        assert!(matches!(err, IntegrationError::RateLimited));
    }
}
