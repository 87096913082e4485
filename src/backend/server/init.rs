/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Build the token issuer from the auth configuration
 * 2. Connect to PostgreSQL and run migrations, if `DATABASE_URL` is set;
 *    otherwise fall back to the in-memory store
 * 3. Pick the media store: Cloudinary when configured, else local disk
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::PgUserStore;
use crate::backend::error::BackendError;
use crate::backend::media::{CloudinaryStore, LocalMediaStore, MediaStore};
use crate::backend::projects::db::PgProjectStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, ProjectStore, StoreError, UserStore};

fn media_store(config: &ServerConfig) -> Result<Arc<dyn MediaStore>, BackendError> {
    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!("Uploads go to Cloudinary cloud '{}'", cloudinary.cloud_name);
            Ok(Arc::new(CloudinaryStore::new(cloudinary)?))
        }
        None => {
            tracing::info!("Uploads go to local directory {}", config.uploads.dir.display());
            Ok(Arc::new(LocalMediaStore::new(
                config.uploads.dir.clone(),
                config.uploads.public_base_url.clone(),
            )))
        }
    }
}

/// Build the application state from a validated configuration
///
/// # Errors
///
/// Fails if a token lifetime does not parse or if `DATABASE_URL` is set but
/// the database cannot be reached.
pub async fn build_state(config: ServerConfig) -> Result<AppState, BackendError> {
    let tokens = TokenIssuer::from_config(&config.auth)?;
    let db_pool = load_database(&config).await.map_err(StoreError::from)?;

    let (users, projects): (Arc<dyn UserStore>, Arc<dyn ProjectStore>) = match &db_pool {
        Some(pool) => (
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgProjectStore::new(pool.clone())),
        ),
        None => {
            let store = MemoryStore::new();
            (Arc::new(store.clone()), Arc::new(store))
        }
    };

    let media = media_store(&config)?;

    Ok(AppState {
        config: Arc::new(config),
        tokens,
        users,
        projects,
        media,
        db_pool,
    })
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_app(app_state: AppState) -> Router<()> {
    tracing::info!("Initializing BackendHub server");
    create_router(app_state)
}
