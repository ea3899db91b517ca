use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use hookrelay_crm::{CrmConfig, CrmIntegration};
use hookrelay_email::{EmailConfig, EmailIntegration};
use hookrelay_integration::DynIntegration;
use hookrelay_server::api::{AppState, router};
use hookrelay_server::config::{
    CRM_TOKEN_ENV, EMAIL_API_KEY_ENV, HookrelayConfig, SIGNING_SECRET_ENV, SLACK_WEBHOOK_URL_ENV,
};
use hookrelay_server::metrics::RelayMetrics;
use hookrelay_signature::SignatureVerifier;
use hookrelay_slack::{SlackConfig, SlackIntegration};

/// hookrelay webhook relay HTTP server.
#[derive(Parser, Debug)]
#[command(name = "hookrelay-server", about = "Signed webhook relay for registration events")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "hookrelay.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from the TOML file, or use defaults if it does not
    // exist. Secrets are read from the environment below, never from the
    // file.
    let config: HookrelayConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };

    hookrelay_server::telemetry::init();

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // The shared signing secret is mandatory: a relay that cannot verify
    // signatures must not come up at all.
    let signing_secret = require_env(SIGNING_SECRET_ENV)?;
    let verifier = SignatureVerifier::new(signing_secret);

    // Register downstream integrations from config, pulling each credential
    // from the environment at startup.
    let mut integrations: HashMap<String, Arc<dyn DynIntegration>> = HashMap::new();

    if config.integrations.crm.enabled {
        let base_url = config.integrations.crm.base_url.as_deref().ok_or(
            "integrations.crm: 'base_url' is required when the crm integration is enabled",
        )?;
        let token = require_env(CRM_TOKEN_ENV)?;

        let mut crm_config = CrmConfig::new(base_url, token);
        if let Some(ref prefix) = config.integrations.crm.deal_title_prefix {
            crm_config = crm_config.with_deal_title_prefix(prefix);
        }
        if let Some(secs) = config.integrations.crm.timeout_seconds {
            crm_config = crm_config.with_timeout(Duration::from_secs(secs));
        }

        integrations.insert("crm".to_owned(), Arc::new(CrmIntegration::new(crm_config)));
        info!("crm integration registered");
    }

    if config.integrations.slack.enabled {
        let webhook_url = require_env(SLACK_WEBHOOK_URL_ENV)?;

        let mut slack_config = SlackConfig::new(webhook_url);
        if let Some(secs) = config.integrations.slack.timeout_seconds {
            slack_config = slack_config.with_timeout(Duration::from_secs(secs));
        }

        integrations.insert(
            "slack".to_owned(),
            Arc::new(SlackIntegration::new(slack_config)),
        );
        info!("slack integration registered");
    }

    if config.integrations.email.enabled {
        let base_url = config.integrations.email.base_url.as_deref().ok_or(
            "integrations.email: 'base_url' is required when the email integration is enabled",
        )?;
        let api_key = require_env(EMAIL_API_KEY_ENV)?;

        let mut email_config = EmailConfig::new(base_url, api_key);
        if let Some(ref name) = config.integrations.email.event_name {
            email_config = email_config.with_event_name(name);
        }
        if let Some(secs) = config.integrations.email.timeout_seconds {
            email_config = email_config.with_timeout(Duration::from_secs(secs));
        }

        integrations.insert(
            "email".to_owned(),
            Arc::new(EmailIntegration::new(email_config)),
        );
        info!("email integration registered");
    }

    if integrations.is_empty() {
        warn!("no integrations enabled; all webhook deliveries will be rejected");
    }

    let state = AppState {
        integrations: Arc::new(integrations),
        verifier: Arc::new(verifier),
        signature_header: config.webhook.signature_header.to_lowercase(),
        metrics: Arc::new(RelayMetrics::new()),
    };
    let app = router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "hookrelay-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("hookrelay-server shut down");
    Ok(())
}

/// Read a required environment variable, with a startup-friendly error.
fn require_env(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::env::var(name).map_err(|_| format!("{name} environment variable is required").into())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
