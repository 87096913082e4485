/**
 * Update Project Handler
 *
 * PATCH /api/v1/projects/updateProject/{id} (authenticated, owner only)
 *
 * Only `title`, `description` and `githubUrl` can change; blank or absent
 * fields keep their stored value.
 */

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::backend::error::{ApiJson, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::projects::handlers::types::{parse_project_id, UpdateProjectRequest};
use crate::backend::server::state::AppState;
use crate::backend::store::OwnedWrite;
use crate::shared::{ApiResponse, Project};

/// Map an owner-restricted write to its value, 404 or 403
pub(crate) fn owned_result<T>(
    outcome: OwnedWrite<T>,
    project_id: Uuid,
    user_id: Uuid,
    action: &str,
) -> Result<T, BackendError> {
    match outcome {
        OwnedWrite::Done(value) => Ok(value),
        OwnedWrite::NotFound => Err(BackendError::not_found("Project not found")),
        OwnedWrite::NotOwner => {
            tracing::warn!("User {} tried to {} project {} they do not own", user_id, action, project_id);
            Err(BackendError::forbidden(format!(
                "You do not have permission to {} this project",
                action
            )))
        }
    }
}

/// Update project handler
///
/// # Errors
///
/// * `400 Bad Request` - Bad id, or no updatable field supplied
/// * `403 Forbidden` - Caller does not own the project
/// * `404 Not Found` - No such project
pub async fn update_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateProjectRequest>,
) -> Result<ApiResponse<Project>, BackendError> {
    let id = parse_project_id(&id)?;
    let changes = request.into_changes()?;

    let outcome = state.projects.update_project(id, user.id, &changes).await?;
    let project = owned_result(outcome, id, user.id, "update")?;

    tracing::info!("Project {} updated by {}", id, user.id);
    Ok(ApiResponse::ok(project, "Project details updated successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_owned_result_mapping() {
        let (project, user) = (Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(owned_result(OwnedWrite::Done(7), project, user, "update").unwrap(), 7);

        let missing = owned_result(OwnedWrite::<()>::NotFound, project, user, "delete").unwrap_err();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let foreign = owned_result(OwnedWrite::<()>::NotOwner, project, user, "delete").unwrap_err();
        assert_eq!(foreign.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(foreign.message(), "You do not have permission to delete this project");
    }
}
