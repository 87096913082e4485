/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container for the
 * application. Every process-wide client is constructed once at startup and
 * injected here:
 * - Server configuration
 * - Token issuer (signing keys)
 * - Credential and project stores
 * - Media store
 * - Optional PostgreSQL pool, kept so it can be closed on shutdown
 *
 * # Thread Safety
 *
 * Every field is an `Arc` or a cheaply clonable handle, so cloning the
 * state per request costs a few reference-count increments. The stores do
 * their own locking.
 *
 * # Example
 *
 * ```rust,no_run
 * use backendhub::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let projects = state.projects.list_projects(&Default::default()).await;
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::media::{LocalMediaStore, MediaStore};
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::store::{MemoryStore, ProjectStore, UserStore};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Validated server configuration
    pub config: Arc<ServerConfig>,

    /// Signs and verifies access/refresh tokens
    pub tokens: TokenIssuer,

    /// Credential store
    pub users: Arc<dyn UserStore>,

    /// Project record store
    pub projects: Arc<dyn ProjectStore>,

    /// Destination for uploaded files
    pub media: Arc<dyn MediaStore>,

    /// Database connection pool
    ///
    /// This is `None` when the server runs on the in-memory store.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// State backed by a fresh `MemoryStore` and the local media store
    ///
    /// Used when no database is configured and by the integration tests.
    pub fn in_memory(config: ServerConfig) -> Result<Self, ConfigError> {
        let media = LocalMediaStore::new(
            config.uploads.dir.clone(),
            config.uploads.public_base_url.clone(),
        );
        Self::in_memory_with_media(config, Arc::new(media))
    }

    /// State backed by a fresh `MemoryStore` and the given media store
    pub fn in_memory_with_media(
        config: ServerConfig,
        media: Arc<dyn MediaStore>,
    ) -> Result<Self, ConfigError> {
        let store = MemoryStore::new();
        Ok(Self {
            tokens: TokenIssuer::from_config(&config.auth)?,
            config: Arc::new(config),
            users: Arc::new(store.clone()),
            projects: Arc::new(store),
            media,
            db_pool: None,
        })
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let config = ServerConfig::builder()
        .bcrypt_cost(4)
        .cookie_secure(false)
        .upload_dir(std::env::temp_dir().join("backendhub-test-uploads"))
        .build()
        .expect("test config is valid");
    AppState::in_memory(config).expect("test state builds")
}
