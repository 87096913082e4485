//! Backend Error Module
//!
//! This module defines the error type used by HTTP handlers and middleware,
//! and how it is converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and status mapping
//! └── conversion.rs - IntoResponse impls, extractor rejections, ApiJson
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use backendhub::backend::error::BackendError;
//! use backendhub::shared::ApiResponse;
//!
//! async fn handler() -> Result<ApiResponse<()>, BackendError> {
//!     Err(BackendError::forbidden("You do not have permission to update this project"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ApiJson;
pub use types::BackendError;
