//! Envelope assertions
//!
//! Every endpoint answers with the same JSON envelope; these helpers check
//! its shape so individual tests can focus on `data`.

use axum::http::StatusCode;
use serde_json::Value;

use super::app::TestResponse;

/// Assert a success envelope with the given status and return `data`
pub fn assert_success(response: &TestResponse, status: StatusCode) -> &Value {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {}",
        response.body
    );
    assert_eq!(response.body["statusCode"], status.as_u16());
    assert_eq!(response.body["success"], true);
    assert!(response.body["message"].is_string());
    &response.body["data"]
}

/// Assert an error envelope with the given status and message
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_error_status(response, status);
    assert_eq!(response.body["message"], message);
}

/// Assert an error envelope with the given status, any message
pub fn assert_error_status(response: &TestResponse, status: StatusCode) {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {}",
        response.body
    );
    assert_eq!(response.body["statusCode"], status.as_u16());
    assert_eq!(response.body["success"], false);
    assert!(response.body["data"].is_null());
    assert!(response.body["errors"].is_array());
}
