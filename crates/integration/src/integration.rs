use async_trait::async_trait;
use hookrelay_core::{IntegrationResponse, RegisterEvent};

use crate::error::IntegrationError;

/// Strongly-typed downstream integration trait with native `async fn`.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods (which desugar to opaque `impl Future` return types). If you need
/// dynamic dispatch, use [`DynIntegration`] instead -- every `Integration`
/// automatically implements `DynIntegration` via a blanket implementation.
pub trait Integration: Send + Sync {
    /// Returns the unique name of this integration, used as the webhook
    /// endpoint path segment.
    fn name(&self) -> &str;

    /// Relay a validated registration event to the downstream API.
    fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> impl std::future::Future<Output = Result<IntegrationResponse, IntegrationError>> + Send;

    /// Perform a health check to verify the integration is operational.
    fn health_check(&self) -> impl std::future::Future<Output = Result<(), IntegrationError>> + Send;
}

/// Object-safe integration trait for use behind `Arc<dyn DynIntegration>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead
/// implement [`Integration`] and rely on the blanket implementation.
#[async_trait]
pub trait DynIntegration: Send + Sync {
    /// Returns the unique name of this integration.
    fn name(&self) -> &str;

    /// Relay a validated registration event to the downstream API.
    async fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> Result<IntegrationResponse, IntegrationError>;

    /// Perform a health check to verify the integration is operational.
    async fn health_check(&self) -> Result<(), IntegrationError>;
}

/// Blanket implementation: any type that implements [`Integration`] also
/// implements [`DynIntegration`], bridging the static and dynamic dispatch
/// worlds.
#[async_trait]
impl<T: Integration + Sync> DynIntegration for T {
    fn name(&self) -> &str {
        Integration::name(self)
    }

    async fn deliver(
        &self,
        event: &RegisterEvent,
    ) -> Result<IntegrationResponse, IntegrationError> {
        Integration::deliver(self, event).await
    }

    async fn health_check(&self) -> Result<(), IntegrationError> {
        Integration::health_check(self).await
    }
}
