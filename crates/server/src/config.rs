use serde::Deserialize;

/// Environment variable holding the shared HMAC signing secret.
pub const SIGNING_SECRET_ENV: &str = "HOOKRELAY_SIGNING_SECRET";

/// Environment variable holding the CRM bearer token.
pub const CRM_TOKEN_ENV: &str = "HOOKRELAY_CRM_TOKEN";

/// Environment variable holding the Slack incoming-webhook URL.
pub const SLACK_WEBHOOK_URL_ENV: &str = "HOOKRELAY_SLACK_WEBHOOK_URL";

/// Environment variable holding the marketing-email API key.
pub const EMAIL_API_KEY_ENV: &str = "HOOKRELAY_EMAIL_API_KEY";

/// Top-level configuration for the hookrelay server, loaded from a TOML file.
///
/// Secrets are never placed in the file; they are read from the environment
/// once at startup (see the `*_ENV` constants).
#[derive(Debug, Default, Deserialize)]
pub struct HookrelayConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Inbound webhook verification configuration.
    #[serde(default)]
    pub webhook: WebhookConfig,
    /// Downstream integration configuration.
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// Inbound webhook verification configuration.
#[derive(Debug, Deserialize)]
pub struct WebhookConfig {
    /// Name of the header carrying the hex HMAC-SHA256 of the raw body.
    #[serde(default = "default_signature_header")]
    pub signature_header: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            signature_header: default_signature_header(),
        }
    }
}

fn default_signature_header() -> String {
    "x-registration-signature".to_owned()
}

/// Downstream integration configuration.
#[derive(Debug, Default, Deserialize)]
pub struct IntegrationsConfig {
    /// CRM person/deal integration.
    #[serde(default)]
    pub crm: CrmSection,
    /// Slack chat-ops notification integration.
    #[serde(default)]
    pub slack: SlackSection,
    /// Marketing-email contact/event integration.
    #[serde(default)]
    pub email: EmailSection,
}

/// Configuration for the CRM integration endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CrmSection {
    /// Whether the `/webhooks/crm` endpoint is served.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the CRM REST API (required when enabled).
    pub base_url: Option<String>,
    /// Prefix for the deal title created per registration.
    pub deal_title_prefix: Option<String>,
    /// Per-call request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Configuration for the Slack integration endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SlackSection {
    /// Whether the `/webhooks/slack` endpoint is served.
    #[serde(default)]
    pub enabled: bool,
    /// Per-call request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Configuration for the marketing-email integration endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct EmailSection {
    /// Whether the `/webhooks/email` endpoint is served.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the marketing-email REST API (required when enabled).
    pub base_url: Option<String>,
    /// Event name recorded against the contact after a registration.
    pub event_name: Option<String>,
    /// Per-call request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: HookrelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.webhook.signature_header, "x-registration-signature");
        assert!(!config.integrations.crm.enabled);
        assert!(!config.integrations.slack.enabled);
        assert!(!config.integrations.email.enabled);
    }

    #[test]
    fn full_config_parses() {
        let config: HookrelayConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [webhook]
            signature_header = "x-keycloak-signature"

            [integrations.crm]
            enabled = true
            base_url = "https://crm.example.com/api/v1"
            deal_title_prefix = "Trial signup"
            timeout_seconds = 5

            [integrations.slack]
            enabled = true

            [integrations.email]
            enabled = true
            base_url = "https://mail.example.com/v1"
            event_name = "signup"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.webhook.signature_header, "x-keycloak-signature");
        assert!(config.integrations.crm.enabled);
        assert_eq!(
            config.integrations.crm.base_url.as_deref(),
            Some("https://crm.example.com/api/v1")
        );
        assert_eq!(config.integrations.crm.timeout_seconds, Some(5));
        assert!(config.integrations.slack.enabled);
        assert_eq!(config.integrations.email.event_name.as_deref(), Some("signup"));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: HookrelayConfig = toml::from_str(
            r#"
            [server]
            port = 3000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }
}
