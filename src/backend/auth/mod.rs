//! Authentication Module
//!
//! This module handles user registration, authentication and session tokens.
//! It provides HTTP handlers for the user endpoints and manages user data
//! and JWT tokens.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User model, password hashing, PostgreSQL credential store
//! - **`sessions`** - Access/refresh token issuing and verification
//! - **`cookies`** - Auth cookie attributes
//! - **`handlers`** - HTTP handlers for the user endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── cookies.rs      - accessToken / refreshToken cookies
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email, name and password → user created (201)
//! 2. **Login**: email and password → credentials verified → token pair set
//!    as cookies and returned in the body
//! 3. **Refresh**: refresh token → new token pair
//! 4. **Current user / Logout**: access token verified by the middleware →
//!    user info returned / cookies cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access and refresh tokens are signed with different secrets
//! - Invalid credentials return 401 without revealing which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Auth cookie helpers
pub mod cookies;

/// HTTP handlers for the user endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{current_user, login, logout, refresh, register};
pub use sessions::{TokenIssuer, TokenPair};
pub use users::{PgUserStore, User};
