pub mod health;
pub mod openapi;
pub mod schemas;
pub mod webhook;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hookrelay_integration::DynIntegration;
use hookrelay_signature::SignatureVerifier;

use crate::metrics::RelayMetrics;

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registered downstream integrations, keyed by endpoint name.
    pub integrations: Arc<HashMap<String, Arc<dyn DynIntegration>>>,
    /// Verifier for the inbound signature header.
    pub verifier: Arc<SignatureVerifier>,
    /// Lowercase name of the header carrying the hex HMAC-SHA256 signature.
    pub signature_header: String,
    /// Relay counters.
    pub metrics: Arc<RelayMetrics>,
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/integrations", get(health::integrations))
        .route("/metrics", get(health::metrics))
        .route("/webhooks/{integration}", post(webhook::relay))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
