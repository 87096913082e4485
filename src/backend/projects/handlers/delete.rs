/**
 * Delete Project Handler
 *
 * DELETE /api/v1/projects/deleteProject/{id} (authenticated, owner only)
 */

use axum::extract::{Path, State};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::projects::handlers::types::{parse_project_id, DeletedProject};
use crate::backend::projects::handlers::update::owned_result;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Delete project handler
///
/// # Errors
///
/// * `400 Bad Request` - The id is not a UUID
/// * `403 Forbidden` - Caller does not own the project
/// * `404 Not Found` - No such project
pub async fn delete_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeletedProject>, BackendError> {
    let id = parse_project_id(&id)?;
    let outcome = state.projects.delete_project(id, user.id).await?;
    owned_result(outcome, id, user.id, "delete")?;

    tracing::info!("Project {} deleted by {}", id, user.id);
    Ok(ApiResponse::ok(DeletedProject { id }, "Project deleted successfully"))
}
