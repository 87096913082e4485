//! Shared Module
//!
//! Types shared between the server and any API client. Everything here is
//! plain serde data: the public projection of a user, project records, list
//! filters and the `{statusCode, data, message, success}` response envelope.

/// Shared error types
pub mod error;

/// Public user data
pub mod user;

/// Project records and filters
pub mod project;

/// Response envelope
pub mod response;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use project::{DownloadCount, DownloadInfo, Project, ProjectFilter, ProjectWithOwner};
pub use response::{ApiErrorBody, ApiResponse};
pub use user::PublicUser;
