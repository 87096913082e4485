//! BackendHub - Main Library
//!
//! BackendHub is a small sharing platform for backend code projects. Users
//! register, log in, and upload project metadata together with source
//! archives; everybody else can browse, filter and download them.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the wire
//!   - Public user and project shapes, the response envelope
//!   - Validation errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routing and middleware
//!   - Credential issuance and verification (bcrypt + JWT)
//!   - Project records, download counting, media uploads
//!   - PostgreSQL and in-memory persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Builds the server. Without it only `shared` is
//!   compiled, which is what an API client needs.
//!
//! # Usage
//!
//! ```rust,no_run
//! use backendhub::backend::server::{build_state, config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let state = build_state(config).await?;
//! let app = create_app(state);
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for request validation
//! - `backend::error::BackendError` for everything a handler can return;
//!   it renders the JSON error envelope

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
