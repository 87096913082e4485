/**
 * Response Envelope
 *
 * Every endpoint answers with the same JSON shape:
 *
 * ```json
 * { "statusCode": 200, "data": { ... }, "message": "...", "success": true }
 * ```
 *
 * Errors use `ApiErrorBody`, which keeps `data` as `null` and adds an
 * `errors` list.
 */
use serde::{Deserialize, Serialize};

/// Successful response envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Build an envelope; `success` follows the status code.
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }
}

/// Error response envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub data: Option<serde_json::Value>,
    pub message: String,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiErrorBody {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data: None,
            message: message.into(),
            success: false,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_follows_status() {
        assert!(ApiResponse::ok((), "fine").success);
        assert!(ApiResponse::created((), "made").success);
        assert!(!ApiResponse::new(404, (), "missing").success);
    }

    #[test]
    fn test_envelope_field_names() {
        let json = serde_json::to_value(ApiResponse::ok(5, "count")).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["data"], 5);
        assert_eq!(json["message"], "count");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_error_body_has_null_data() {
        let json = serde_json::to_value(ApiErrorBody::new(401, "Unauthorized request")).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"], serde_json::json!([]));
    }
}
