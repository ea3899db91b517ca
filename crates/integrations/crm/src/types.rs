use serde::{Deserialize, Serialize};

/// Request body for creating a person record.
#[derive(Debug, Serialize)]
pub struct CreatePersonRequest {
    /// Display name of the person.
    pub name: String,
    /// Email address the person registered with.
    pub email: String,
}

/// Request body for creating a deal associated with a person.
#[derive(Debug, Serialize)]
pub struct CreateDealRequest {
    /// Title of the deal.
    pub title: String,
    /// Identifier of the person record the deal belongs to.
    pub person_id: i64,
}

/// Record-creation response returned by the CRM API.
#[derive(Debug, Deserialize)]
pub struct CreatedRecord {
    /// Identifier of the created record.
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_request_serializes() {
        let req = CreatePersonRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["name"], "Ada Lovelace");
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn created_record_deserializes() {
        let record: CreatedRecord = serde_json::from_str(r#"{"id": 42, "extra": true}"#).unwrap();
        assert_eq!(record.id, 42);
    }
}
