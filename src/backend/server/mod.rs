//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading and validation, database connection
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - State construction and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - ServerConfig, ConfigError, load_database
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - build_state and create_app
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load()` reads the optional
//!    TOML file and environment
//! 2. **State Creation**: `build_state` connects the stores, token issuer and
//!    media store
//! 3. **Router Creation**: `create_app` configures all routes and layers
//!
//! # Example
//!
//! ```rust,no_run
//! use backendhub::backend::server::{build_state, config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(build_state(config).await?);
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_state, create_app};
pub use state::AppState;
