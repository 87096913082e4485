/**
 * Project Routes
 *
 * Mounted under `/api/v1/projects`.
 *
 * ## Public
 * - `GET /allproject` - List projects (`search`, `language`, `framework`)
 * - `GET /projectDetails/{id}` - One project
 * - `GET /downloadProject/{id}` - Record a download, return file URLs
 * - `GET /downloadCount/{id}` - Download counter
 *
 * ## Authenticated
 * - `POST /uploadproject` - Create project (multipart, larger body limit)
 * - `PATCH /updateProject/{id}` - Update owned project
 * - `DELETE /deleteProject/{id}` - Delete owned project
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::projects::handlers::{
    create_project, delete_project, download_count, download_project, list_projects,
    project_details, update_project,
};
use crate::backend::server::state::AppState;

/// Configure project routes
///
/// The upload route gets its own body limit (`uploads.max_bytes`); every
/// other route keeps the router-wide JSON limit.
pub fn configure_project_routes(app_state: AppState) -> Router<AppState> {
    let upload_limit = app_state.config.uploads.max_bytes;

    let protected = Router::new()
        .route(
            "/uploadproject",
            post(create_project).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/updateProject/{id}", patch(update_project))
        .route("/deleteProject/{id}", delete(delete_project))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    Router::new()
        .route("/allproject", get(list_projects))
        .route("/projectDetails/{id}", get(project_details))
        .route("/downloadProject/{id}", get(download_project))
        .route("/downloadCount/{id}", get(download_count))
        .merge(protected)
}
