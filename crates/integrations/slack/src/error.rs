use hookrelay_integration::IntegrationError;
use thiserror::Error;

/// Errors specific to the Slack integration.
///
/// These are internal errors that get converted into [`IntegrationError`] at
/// the public API boundary.
#[derive(Debug, Error)]
pub enum SlackError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook endpoint returned a non-success response.
    #[error("Slack webhook error: {0}")]
    Webhook(String),

    /// The webhook endpoint returned HTTP 429 (Too Many Requests).
    #[error("rate limited by Slack")]
    RateLimited,
}

impl From<SlackError> for IntegrationError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Http(e) => IntegrationError::Connection(e.to_string()),
            SlackError::Webhook(msg) => {
                IntegrationError::DeliveryFailed(format!("unable to post notification: {msg}"))
            }
            SlackError::RateLimited => IntegrationError::RateLimited,
        }
    }
}
