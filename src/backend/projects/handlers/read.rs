/**
 * Project Read Handlers
 *
 * - GET /api/v1/projects/allproject?search=&language=&framework=
 * - GET /api/v1/projects/projectDetails/{id}
 *
 * Both are public and include the uploader's public profile.
 */

use axum::extract::{Path, Query, State};

use crate::backend::error::BackendError;
use crate::backend::projects::handlers::types::parse_project_id;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, ProjectFilter, ProjectWithOwner};

/// List projects, newest first, optionally filtered
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<ApiResponse<Vec<ProjectWithOwner>>, BackendError> {
    let projects = state.projects.list_projects(&filter).await?;
    tracing::debug!("Listing {} project(s)", projects.len());
    Ok(ApiResponse::ok(projects, "All projects fetched successfully"))
}

/// Fetch one project
///
/// # Errors
///
/// * `400 Bad Request` - The id is not a UUID
/// * `404 Not Found` - No such project
pub async fn project_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectWithOwner>, BackendError> {
    let id = parse_project_id(&id)?;
    let project = state
        .projects
        .find_project(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Project not found"))?;

    Ok(ApiResponse::ok(project, "Project details fetched successfully"))
}
