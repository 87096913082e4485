//! Projects Module
//!
//! Project records: creation with file uploads, browsing, owner-only
//! updates and deletes, and the download counter.
//!
//! # Module Structure
//!
//! ```text
//! projects/
//! ├── mod.rs       - Module exports and documentation
//! ├── db.rs        - PostgreSQL ProjectStore
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Ownership
//!
//! A project belongs to the user who uploaded it. Update and delete load the
//! project first and compare its `user_id` with the authenticated user:
//! missing projects are 404, foreign projects 403.

/// PostgreSQL project store
pub mod db;

/// HTTP handlers for the project endpoints
pub mod handlers;

pub use db::PgProjectStore;
