//! Media Storage Module
//!
//! Uploaded project files are handed to a `MediaStore`, which stores the
//! bytes somewhere publicly reachable and returns the URL.
//!
//! # Implementations
//!
//! - **`cloudinary::CloudinaryStore`** - unsigned uploads to Cloudinary,
//!   selected when a cloud name and upload preset are configured
//! - **`local::LocalMediaStore`** - files written to the upload directory and
//!   served by the router under `/uploads`
//!
//! # Module Structure
//!
//! ```text
//! media/
//! ├── mod.rs        - MediaStore trait, UploadedFile, MediaError
//! ├── cloudinary.rs - Cloudinary upload API client
//! └── local.rs      - Local directory store
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Cloudinary upload API client
pub mod cloudinary;

/// Local directory store
pub mod local;

pub use cloudinary::CloudinaryStore;
pub use local::LocalMediaStore;

/// Media upload errors
#[derive(Debug, Error)]
pub enum MediaError {
    /// Filesystem failure in the local store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure talking to the media service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The media service answered with a non-success status
    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The media service answered without a usable URL
    #[error("invalid upload response: {0}")]
    InvalidResponse(String),
}

/// One file part of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, if any
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Stores file bytes and returns a public URL
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError>;
}

/// Reduce a client-supplied file name to a safe single path component
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Leading dots are dropped so the result is never hidden or `..`.
pub fn sanitize_file_name(name: Option<&str>) -> String {
    let base = name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
