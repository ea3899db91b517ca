use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use hookrelay_integration::DynIntegration;

use crate::metrics::MetricsSnapshot;

use super::AppState;
use super::schemas::{
    HealthResponse, IntegrationHealth, IntegrationsHealthResponse, MetricsResponse,
};

fn build_metrics_response(snap: &MetricsSnapshot) -> MetricsResponse {
    MetricsResponse {
        received: snap.received,
        rejected_signature: snap.rejected_signature,
        rejected_payload: snap.rejected_payload,
        delivered: snap.delivered,
        delivery_failed: snap.delivery_failed,
    }
}

/// `GET /health` -- returns service status together with a metrics snapshot.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and a snapshot of relay counters.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let snap = state.metrics.snapshot();

    let body = HealthResponse {
        status: "ok".into(),
        metrics: build_metrics_response(&snap),
    };

    (StatusCode::OK, Json(body))
}

/// `GET /metrics` -- returns relay counters as JSON.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    summary = "Relay metrics",
    description = "Returns current relay counters for monitoring.",
    responses(
        (status = 200, description = "Current metric counters", body = MetricsResponse)
    )
)]
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snap = state.metrics.snapshot();
    (StatusCode::OK, Json(build_metrics_response(&snap)))
}

/// `GET /health/integrations` -- runs each registered integration's health
/// check and reports the results.
#[utoipa::path(
    get,
    path = "/health/integrations",
    tag = "Health",
    summary = "Integration health",
    description = "Runs the health check of every registered integration and reports per-integration status.",
    responses(
        (status = 200, description = "Per-integration health results", body = IntegrationsHealthResponse)
    )
)]
pub async fn integrations(State(state): State<AppState>) -> impl IntoResponse {
    let mut results = Vec::with_capacity(state.integrations.len());

    for (name, integration) in state.integrations.iter() {
        let entry = match integration.health_check().await {
            Ok(()) => IntegrationHealth {
                name: name.clone(),
                healthy: true,
                error: None,
            },
            Err(e) => IntegrationHealth {
                name: name.clone(),
                healthy: false,
                error: Some(e.to_string()),
            },
        };
        results.push(entry);
    }

    results.sort_by(|a, b| a.name.cmp(&b.name));

    (
        StatusCode::OK,
        Json(IntegrationsHealthResponse {
            integrations: results,
        }),
    )
}
