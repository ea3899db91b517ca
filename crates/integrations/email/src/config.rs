use std::time::Duration;

/// Configuration for the marketing-email integration.
#[derive(Clone)]
pub struct EmailConfig {
    /// Base URL of the marketing-email REST API.
    pub base_url: String,

    /// Bearer key used to authenticate API requests.
    pub api_key: String,

    /// Event name recorded against the contact after a registration. The
    /// provider's automation triggers the welcome email off this event.
    pub event_name: String,

    /// Request timeout for each downstream call.
    pub timeout: Duration,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("event_name", &self.event_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailConfig {
    /// Create a new configuration targeting the given API base URL.
    ///
    /// Defaults to a 10-second request timeout and the `"user-registered"`
    /// event name.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            event_name: "user-registered".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the registration event name.
    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
