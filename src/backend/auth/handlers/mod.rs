//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the user endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── refresh.rs  - Token refresh handler
//! ├── logout.rs   - Cookie clearing handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/v1/users/registerUser
//! - **`login`** - POST /api/v1/users/loginUser
//! - **`refresh`** - POST /api/v1/users/refreshToken
//! - **`logout`** - POST /api/v1/users/logoutUser (authenticated)
//! - **`current_user`** - GET /api/v1/users/currentUser (authenticated)

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, LogoutResponse, RefreshRequest, RegisterRequest};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use me::current_user;
pub use refresh::refresh;
pub use register::register;
