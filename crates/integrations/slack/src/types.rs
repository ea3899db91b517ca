use serde::Serialize;

/// Request body for a Slack incoming-webhook post.
#[derive(Debug, Serialize)]
pub struct WebhookMessage {
    /// Plain message text.
    pub text: String,
}
