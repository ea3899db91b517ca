use std::time::Duration;

/// Configuration for the Slack integration.
#[derive(Clone)]
pub struct SlackConfig {
    /// Incoming-webhook URL messages are posted to. The URL embeds its own
    /// credential, so it is treated as a secret.
    pub webhook_url: String,

    /// Request timeout for the webhook call.
    pub timeout: Duration,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("webhook_url", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SlackConfig {
    /// Create a new configuration posting to the given incoming-webhook URL.
    ///
    /// Defaults to a 10-second request timeout.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SlackConfig::new("https://hooks.slack.com/services/T0/B0/xyz");
        assert_eq!(config.webhook_url, "https://hooks.slack.com/services/T0/B0/xyz");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn with_timeout() {
        let config = SlackConfig::new("https://hooks.slack.com/x").with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn debug_redacts_webhook_url() {
        let config = SlackConfig::new("https://hooks.slack.com/services/secret-path");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-path"));
    }
}
