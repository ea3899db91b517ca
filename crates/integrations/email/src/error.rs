use hookrelay_integration::IntegrationError;
use thiserror::Error;

/// Errors specific to the marketing-email integration.
///
/// These are internal errors that get converted into [`IntegrationError`] at
/// the public API boundary. The contact/event split identifies which call of
/// the two-step sequence failed.
#[derive(Debug, Error)]
pub enum EmailError {
    /// The contact-upsert call failed.
    #[error("unable to create contact record: {0}")]
    Contact(String),

    /// The registration-event call failed.
    #[error("unable to record registration event: {0}")]
    Event(String),

    /// The API returned HTTP 429 (Too Many Requests).
    #[error("rate limited by email API")]
    RateLimited,
}

impl From<EmailError> for IntegrationError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Contact(_) | EmailError::Event(_) => {
                IntegrationError::DeliveryFailed(err.to_string())
            }
            EmailError::RateLimited => IntegrationError::RateLimited,
        }
    }
}
