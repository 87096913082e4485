//! Backend Module
//!
//! This module contains all server-side code for BackendHub: an Axum HTTP
//! server exposing the `/api/v1/users` and `/api/v1/projects` endpoints.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, password hashing, token issuance, auth handlers
//! - **`middleware`** - Identity middleware for protected routes
//! - **`projects`** - Project CRUD and download counting
//! - **`store`** - Persistence traits and the in-memory implementation
//! - **`media`** - File uploads (Cloudinary or local disk)
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── projects/       - Project records
//! ├── store/          - Persistence traits
//! ├── media/          - Media uploads
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` is built once at startup and cloned into every handler. It
//! holds the configuration, the token issuer and `Arc<dyn ...>` handles to
//! the user store, project store and media store. Nothing is global.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. `BackendError` renders the
//! `{statusCode, data, message, success, errors}` envelope.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Project records and download counting
pub mod projects;

/// Persistence traits
pub mod store;

/// Media uploads
pub mod media;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{build_state, create_app, AppState};
