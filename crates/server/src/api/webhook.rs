use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use hookrelay_core::{RegisterEvent, ResponseStatus};
use hookrelay_integration::{DynIntegration, IntegrationError};
use hookrelay_signature::SignatureError;

use super::AppState;
use super::schemas::{AckResponse, ErrorResponse};

/// A webhook request rejected or failed at some stage of the relay pipeline.
///
/// Each variant maps to exactly one terminal HTTP response; the pipeline
/// produces at most one rejection per request.
#[derive(Debug, Error)]
pub enum RelayRejection {
    /// The signature header was absent from the request.
    #[error("missing signature header")]
    MissingSignature,

    /// The supplied signature did not match the request body. Carries no
    /// detail about whether the body or the secret was wrong.
    #[error("invalid signature")]
    InvalidSignature,

    /// No signing secret is configured; verification fails closed.
    #[error("signing secret is not configured")]
    SecretNotConfigured,

    /// The body was not a valid registration event.
    #[error("invalid registration payload: {0}")]
    InvalidPayload(String),

    /// No integration is registered under the requested name.
    #[error("unknown integration: {0}")]
    UnknownIntegration(String),

    /// The downstream delivery failed.
    #[error("{integration}: {source}")]
    Downstream {
        /// Name of the integration whose delivery failed.
        integration: String,
        /// The underlying delivery error.
        #[source]
        source: IntegrationError,
    },
}

impl IntoResponse for RelayRejection {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            Self::MissingSignature => (
                StatusCode::FORBIDDEN,
                "missing signature header".to_owned(),
                None,
            ),
            Self::InvalidSignature => (StatusCode::FORBIDDEN, "invalid signature".to_owned(), None),
            Self::SecretNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "unable to verify signature".to_owned(),
                Some("signing secret is not configured".to_owned()),
            ),
            Self::InvalidPayload(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "invalid registration payload".to_owned(),
                Some(detail.clone()),
            ),
            Self::UnknownIntegration(name) => (
                StatusCode::NOT_FOUND,
                format!("unknown integration: {name}"),
                None,
            ),
            Self::Downstream {
                integration,
                source,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "unable to relay registration event".to_owned(),
                Some(format!("{integration}: {source}")),
            ),
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

/// `POST /webhooks/{integration}` -- the relay pipeline.
///
/// Verifies the HMAC signature over the exact raw body bytes, validates the
/// payload into a [`RegisterEvent`], and forwards it to the integration
/// registered under the path name. Exactly one terminal response per
/// request: a 200 acknowledgement echoing the parsed body, or a structured
/// error identifying the failed stage.
#[utoipa::path(
    post,
    path = "/webhooks/{integration}",
    tag = "Webhooks",
    summary = "Relay a registration event",
    description = "Verifies the signature header against the raw body, validates the payload, and forwards derived fields to the named downstream integration.",
    params(
        ("integration" = String, Path, description = "Registered integration name (e.g. crm, slack, email)")
    ),
    request_body(content = RegisterEvent, description = "Signed registration event"),
    responses(
        (status = 200, description = "Event relayed", body = AckResponse),
        (status = 403, description = "Missing or mismatched signature", body = ErrorResponse),
        (status = 404, description = "Unknown integration", body = ErrorResponse),
        (status = 500, description = "Unconfigured secret, invalid payload, or downstream failure", body = ErrorResponse)
    )
)]
#[instrument(
    skip_all,
    fields(delivery_id = %uuid::Uuid::new_v4(), integration = %integration)
)]
pub async fn relay(
    State(state): State<AppState>,
    Path(integration): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, RelayRejection> {
    state.metrics.increment_received();

    let Some(target) = state.integrations.get(&integration) else {
        warn!("webhook for unregistered integration");
        return Err(RelayRejection::UnknownIntegration(integration));
    };
    let target = Arc::clone(target);

    // Fail closed before touching the header: a relay without a secret must
    // reject everything rather than skip verification.
    if !state.verifier.is_configured() {
        state.metrics.increment_rejected_signature();
        return Err(RelayRejection::SecretNotConfigured);
    }

    let Some(signature) = headers
        .get(state.signature_header.as_str())
        .and_then(|value| value.to_str().ok())
    else {
        state.metrics.increment_rejected_signature();
        return Err(RelayRejection::MissingSignature);
    };

    if let Err(err) = state.verifier.verify(&body, signature) {
        state.metrics.increment_rejected_signature();
        return Err(match err {
            SignatureError::MissingSecret => RelayRejection::SecretNotConfigured,
            SignatureError::Mismatch => RelayRejection::InvalidSignature,
        });
    }

    // Parse the raw body once into generic JSON (echoed back on success),
    // then validate it into the typed event. Any violation aborts before a
    // downstream call is attempted.
    let contents: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        state.metrics.increment_rejected_payload();
        RelayRejection::InvalidPayload(e.to_string())
    })?;
    let event: RegisterEvent = serde_json::from_value(contents.clone()).map_err(|e| {
        state.metrics.increment_rejected_payload();
        RelayRejection::InvalidPayload(e.to_string())
    })?;

    match target.deliver(&event).await {
        Ok(response) if response.status == ResponseStatus::Success => {
            state.metrics.increment_delivered();
            debug!("registration event relayed");
            Ok((
                StatusCode::OK,
                Json(AckResponse {
                    message: "ok".to_owned(),
                    contents,
                }),
            ))
        }
        Ok(response) => {
            state.metrics.increment_delivery_failed();
            Err(RelayRejection::Downstream {
                integration,
                source: IntegrationError::DeliveryFailed(response.body.to_string()),
            })
        }
        Err(source) => {
            state.metrics.increment_delivery_failed();
            Err(RelayRejection::Downstream {
                integration,
                source,
            })
        }
    }
}
