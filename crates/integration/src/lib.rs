pub mod error;
pub mod integration;

pub use error::IntegrationError;
pub use integration::{DynIntegration, Integration};
