pub mod config;
pub mod error;
pub mod integration;
pub mod types;

pub use config::CrmConfig;
pub use error::CrmError;
pub use integration::CrmIntegration;
