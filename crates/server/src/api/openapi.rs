use hookrelay_core::{AuthDetails, EventType, RegisterEvent, RegistrationDetails};

use super::schemas::{
    AckResponse, ErrorResponse, HealthResponse, IntegrationHealth, IntegrationsHealthResponse,
    MetricsResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "hookrelay API",
        version = "0.1.0",
        description = "Signed webhook relay for identity-provider registration events. Verifies HMAC signatures, validates payloads, and forwards derived fields to downstream integrations.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health and metrics"),
        (name = "Webhooks", description = "Signed registration event relay")
    ),
    paths(
        super::health::health,
        super::health::metrics,
        super::health::integrations,
        super::webhook::relay,
    ),
    components(schemas(
        AckResponse,
        ErrorResponse,
        HealthResponse,
        MetricsResponse,
        IntegrationHealth,
        IntegrationsHealthResponse,
        RegisterEvent,
        EventType,
        AuthDetails,
        RegistrationDetails,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/webhooks/{integration}"));
        assert!(json.contains("/health"));
    }
}
