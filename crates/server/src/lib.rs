pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

pub use error::ServerError;
