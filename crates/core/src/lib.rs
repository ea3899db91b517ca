pub mod event;
pub mod outcome;

pub use event::{AuthDetails, EventType, RegisterEvent, RegistrationDetails};
pub use outcome::{IntegrationResponse, ResponseStatus};
