use serde::Serialize;

/// Request body for upserting a contact.
#[derive(Debug, Serialize)]
pub struct UpsertContactRequest {
    /// Email address of the contact.
    pub email: String,

    /// First name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Identity-provider user id, stored as an external reference.
    pub user_id: String,
}

/// Request body for recording an event against a contact.
#[derive(Debug, Serialize)]
pub struct RecordEventRequest {
    /// Email address identifying the contact.
    pub email: String,

    /// Name of the event (e.g. `user-registered`).
    pub event_name: String,
}
