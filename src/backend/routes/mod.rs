//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation, shared layers, fallback
//! ├── user_routes.rs    - /api/v1/users
//! └── project_routes.rs - /api/v1/projects
//! ```
//!
//! # Authentication
//!
//! Protected routes are grouped in their own sub-router with
//! `auth_middleware` applied through `route_layer`, so unknown paths still
//! reach the 404 fallback instead of the middleware.

/// Main router creation
pub mod router;

/// User endpoints
pub mod user_routes;

/// Project endpoints
pub mod project_routes;

// Re-export commonly used functions
pub use router::create_router;
