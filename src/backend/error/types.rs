/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler and
 * middleware in the backend.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by handlers with an explicit status:
 * - Missing or invalid credentials (401)
 * - Ownership violations (403)
 * - Missing records (404)
 *
 * ## Wrapped Errors
 *
 * Errors from lower layers, converted with `?`:
 * - Validation errors from `shared` (400)
 * - Store errors (409 for conflicts, 500 otherwise)
 * - Media upload errors (502)
 * - Token signing and password hashing errors (500)
 *
 * Server-side failures never leak their details to the client; the
 * response carries a generic message and the detail goes to the log.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::media::MediaError;
use crate::backend::server::config::ConfigError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Message returned for every 5xx that is not a media failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use backendhub::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Project not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. 401, 403, 404)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Persistence error
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Media upload error
    #[error("Media error: {0}")]
    MediaError(#[from] MediaError),

    /// JWT signing error
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// bcrypt hashing or verification error
    #[error("Password error: {0}")]
    PasswordError(#[from] bcrypt::BcryptError),

    /// Configuration error surfaced at runtime
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// Malformed JSON in a request body
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - the status stored in the error
    /// - `SharedError`, `SerializationError` - 400 Bad Request
    /// - `StoreError::Conflict` - 409 Conflict
    /// - `StoreError::Constraint` - 400 Bad Request
    /// - `MediaError` - 502 Bad Gateway
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::StoreError(err) => match err {
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::Constraint(_) => StatusCode::BAD_REQUEST,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::MediaError(_) => StatusCode::BAD_GATEWAY,
            Self::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PasswordError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SerializationError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message shown to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.public_message().to_string(),
            Self::StoreError(StoreError::Conflict(message)) => message.clone(),
            Self::StoreError(StoreError::Constraint(message)) => message.clone(),
            Self::MediaError(_) => "File upload failed".to_string(),
            Self::SerializationError(err) => format!("Invalid JSON body: {}", err),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this error is the server's fault and should be logged as such.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_shortcut_constructors() {
        assert_eq!(BackendError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("x").status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError =
            SharedError::validation("title", "All fields are required").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(backend_error.message(), "All fields are required");
    }

    #[test]
    fn test_store_conflict_maps_to_409() {
        let error: BackendError = StoreError::Conflict("User with this email already exists".into()).into();
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.message(), "User with this email already exists");
    }

    #[test]
    fn test_database_error_is_hidden() {
        let error: BackendError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
        assert!(error.is_server_error());
    }

    #[test]
    fn test_media_error_maps_to_bad_gateway() {
        let error: BackendError = MediaError::InvalidResponse("no secure_url".into()).into();
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.message(), "File upload failed");
    }
}
