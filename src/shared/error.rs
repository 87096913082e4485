//! Shared Error Types
//!
//! Errors produced while validating request payloads. They carry the field
//! that failed and a message that is safe to show to the caller.
//!
//! # Usage
//!
//! ```rust
//! use backendhub::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! assert_eq!(error.public_message(), "Email is required");
//! ```
use thiserror::Error;

/// Request validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The message shown to API callers, without the field prefix.
    pub fn public_message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}

/// Returns the trimmed value when it is present and non-blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("email", "Invalid email format");
        let SharedError::ValidationError { field, message } = error;
        assert_eq!(field, "email");
        assert_eq!(message, "Invalid email format");
    }

    #[test]
    fn test_public_message_drops_field() {
        let error = SharedError::validation("title", "All fields are required");
        assert_eq!(error.public_message(), "All fields are required");
        assert!(error.to_string().contains("'title'"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  rust ".to_string())), Some("rust".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
