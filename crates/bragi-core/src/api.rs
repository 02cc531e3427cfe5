//! JSON envelope exchanged over the HTTP boundary.
//!
//! Every response body has the shape
//! `{ "success": bool, "message"?: string, "data"?: any }`.

use serde::{Deserialize, Serialize};

/// Route listing the saved scenarios.
pub const SCENARIOS_PATH: &str = "/api/scenarios";
/// Route saving (creating or overwriting) a scenario.
pub const SAVE_PATH: &str = "/api/savejson";

/// Response envelope shared by server and client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response carrying `data` and a confirmation message.
    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Failure response with a user-facing message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_failure_omits_data() {
        let body = serde_json::to_value(ApiResponse::<Value>::failure("Failed to list scenarios."))
            .unwrap();
        assert_eq!(
            body,
            json!({ "success": false, "message": "Failed to list scenarios." })
        );
    }

    #[test]
    fn test_list_shape_has_no_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![json!({ "id": "a" })])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [{ "id": "a" }] }));
    }

    #[test]
    fn test_parse_failure_envelope() {
        let parsed: ApiResponse<Value> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.message.as_deref(), Some("nope"));
        assert!(parsed.data.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct SavedId {
        id: String,
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponse<T> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_decode_payload_without_default() {
        let saved: ApiResponse<SavedId> = decode(r#"{"success":true,"data":{"id":"saga"}}"#);
        assert_eq!(saved.data.map(|d| d.id).as_deref(), Some("saga"));

        let failed: ApiResponse<SavedId> = decode(r#"{"success":false}"#);
        assert!(failed.message.is_none());
        assert!(failed.data.is_none());
    }
}
