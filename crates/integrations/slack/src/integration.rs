use hookrelay_core::{IntegrationResponse, RegisterEvent};
use hookrelay_integration::{Integration, IntegrationError};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::SlackConfig;
use crate::error::SlackError;
use crate::types::WebhookMessage;

/// Slack integration that announces new registrations in a channel via an
/// incoming webhook.
pub struct SlackIntegration {
    config: SlackConfig,
    client: Client,
}

impl SlackIntegration {
    /// Create a new Slack integration with the given configuration.
    ///
    /// Uses a default `reqwest::Client` with the configured timeout.
    pub fn new(config: SlackConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new Slack integration with a custom HTTP client.
    pub fn with_client(config: SlackConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Render the notification text for a registration event.
    fn message_text(event: &RegisterEvent) -> String {
        let name = event.display_name();
        let via = event
            .details
            .identity_provider
            .as_deref()
            .map(|idp| format!(" via {idp}"))
            .unwrap_or_default();
        let when = event
            .timestamp()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_owned());

        format!(
            "New registration: {name} <{email}>{via} from {ip} at {when}",
            email = event.details.email,
            ip = event.auth_details.ip_address,
        )
    }

    /// Post a message to the incoming webhook and interpret the response.
    async fn post_message(&self, message: &WebhookMessage) -> Result<(), SlackError> {
        debug!("posting registration notification to Slack");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SlackError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Webhook(format!("HTTP {status}: {body}")));
        }

        Ok(())
    }
}

impl Integration for SlackIntegration {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "slack"
    }

    #[instrument(skip(self, event), fields(integration = "slack", email = %event.details.email))]
    async fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> Result<IntegrationResponse, IntegrationError> {
        let message = WebhookMessage {
            text: Self::message_text(event),
        };

        self.post_message(&message).await?;

        Ok(IntegrationResponse::success(serde_json::json!({
            "posted": true,
        })))
    }

    #[instrument(skip(self), fields(integration = "slack"))]
    async fn health_check(&self) -> Result<(), IntegrationError> {
        // Incoming webhooks expose no side-effect-free probe; posting a test
        // message would be visible in the channel. Verify the URL is present
        // and well-formed instead.
        if self.config.webhook_url.is_empty() {
            return Err(IntegrationError::Configuration(
                "webhook URL is empty".into(),
            ));
        }
        reqwest::Url::parse(&self.config.webhook_url)
            .map_err(|e| IntegrationError::Configuration(format!("invalid webhook URL: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hookrelay_core::{AuthDetails, EventType, RegistrationDetails, ResponseStatus};

    use super::*;

    /// A minimal mock HTTP server built on tokio that returns one canned
    /// response, then shuts down. Returns the raw request bytes.
    struct MockWebhookServer {
        listener: tokio::net::TcpListener,
        url: String,
    }

    impl MockWebhookServer {
        async fn start() -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind mock server");
            let port = listener.local_addr().unwrap().port();
            let url = format!("http://127.0.0.1:{port}/services/T0/B0/xyz");
            Self { listener, url }
        }

        async fn respond_once(self, status_code: u16, body: &str) -> Vec<u8> {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};

            let (mut stream, _) = self.listener.accept().await.unwrap();

            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&buf) {
                let read =
                    tokio::time::timeout(Duration::from_millis(250), stream.read(&mut chunk))
                        .await;
                match read {
                    Ok(Ok(n)) if n > 0 => buf.extend_from_slice(&chunk[..n]),
                    _ => break,
                }
            }

            let response = format!(
                "HTTP/1.1 {status_code} OK\r\n\
                 Content-Type: text/plain\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            buf
        }
    }

    /// Whether `buf` holds a complete HTTP request (headers plus a body of
    /// the advertised `Content-Length`).
    fn request_complete(buf: &[u8]) -> bool {
        let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= pos + 4 + content_length
    }

    fn test_event() -> RegisterEvent {
        RegisterEvent {
            time: 1_714_670_000_000,
            event_type: EventType::Register,
            auth_details: AuthDetails {
                user_id: "user-1".into(),
                ip_address: "203.0.113.7".into(),
            },
            details: RegistrationDetails {
                email: "ada@example.com".into(),
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                identity_provider: Some("google".into()),
            },
        }
    }

    #[test]
    fn integration_name() {
        let integration = SlackIntegration::new(SlackConfig::new("https://hooks.slack.com/x"));
        assert_eq!(Integration::name(&integration), "slack");
    }

    #[test]
    fn message_text_includes_registration_fields() {
        let text = SlackIntegration::message_text(&test_event());
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("Ada Lovelace"));
        assert!(text.contains("via google"));
        assert!(text.contains("203.0.113.7"));
        assert!(text.contains("2024"));
    }

    #[tokio::test]
    async fn deliver_posts_notification() {
        let server = MockWebhookServer::start().await;
        let config = SlackConfig::new(&server.url).with_timeout(Duration::from_secs(2));
        let integration = SlackIntegration::new(config);

        let server_handle = tokio::spawn(async move { server.respond_once(200, "ok").await });

        let response = integration.deliver(&test_event()).await.unwrap();
        let request = server_handle.await.unwrap();

        assert_eq!(response.status, ResponseStatus::Success);
        let request_text = String::from_utf8_lossy(&request);
        assert!(request_text.starts_with("POST /services/T0/B0/xyz"));
        assert!(request_text.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn deliver_non_success_status_fails() {
        let server = MockWebhookServer::start().await;
        let config = SlackConfig::new(&server.url);
        let integration = SlackIntegration::new(config);

        let server_handle =
            tokio::spawn(async move { server.respond_once(404, "no_service").await });

        let err = integration.deliver(&test_event()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(err.to_string().contains("unable to post notification"));
    }

    #[tokio::test]
    async fn deliver_rate_limited() {
        let server = MockWebhookServer::start().await;
        let config = SlackConfig::new(&server.url);
        let integration = SlackIntegration::new(config);

        let server_handle =
            tokio::spawn(async move { server.respond_once(429, "rate_limited").await });

        let err = integration.deliver(&test_event()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(err, IntegrationError::RateLimited));
    }

    #[tokio::test]
    async fn health_check_validates_url() {
        let ok = SlackIntegration::new(SlackConfig::new("https://hooks.slack.com/services/x"));
        assert!(ok.health_check().await.is_ok());

        let bad = SlackIntegration::new(SlackConfig::new("not a url"));
        let err = bad.health_check().await.unwrap_err();
        assert!(matches!(err, IntegrationError::Configuration(_)));
    }
}
