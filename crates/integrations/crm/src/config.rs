use std::time::Duration;

/// Configuration for the CRM integration.
#[derive(Clone)]
pub struct CrmConfig {
    /// Base URL of the CRM REST API (e.g. `https://crm.example.com/api/v1`).
    pub base_url: String,

    /// Bearer token used to authenticate API requests.
    pub api_token: String,

    /// Prefix for the title of the deal created per registration. The
    /// registrant's email is appended.
    pub deal_title_prefix: String,

    /// Request timeout for each downstream call.
    pub timeout: Duration,
}

impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("deal_title_prefix", &self.deal_title_prefix)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CrmConfig {
    /// Create a new configuration targeting the given API base URL.
    ///
    /// Defaults to a 10-second request timeout and a `"New signup"` deal
    /// title prefix.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            deal_title_prefix: "New signup".to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set the deal title prefix.
    #[must_use]
    pub fn with_deal_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.deal_title_prefix = prefix.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
