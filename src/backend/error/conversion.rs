/**
 * Error Conversion
 *
 * This module turns backend results into HTTP responses.
 *
 * # Response Format
 *
 * Errors are rendered as the error envelope:
 * ```json
 * {
 *   "statusCode": 404,
 *   "data": null,
 *   "message": "Project not found",
 *   "success": false,
 *   "errors": []
 * }
 * ```
 *
 * Successful `ApiResponse` values are rendered with the status code they
 * carry. Extractor rejections (bad JSON, broken multipart bodies) are mapped
 * into `BackendError` so that they use the same envelope.
 */

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        FromRequest,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::{ApiErrorBody, ApiResponse};

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server errors are logged here, once, with their full detail.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if self.is_server_error() {
            tracing::error!("Request failed with {}: {}", status.as_u16(), self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status.as_u16(), message);
        }

        (status, Json(ApiErrorBody::new(status.as_u16(), message))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        BackendError::handler(err.status(), err.body_text())
    }
}

/// JSON extractor whose rejection is a `BackendError`
///
/// Behaves like `axum::Json` but malformed bodies produce the error envelope
/// instead of a plain-text rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);
