/**
 * Download Handlers
 *
 * - GET /api/v1/projects/downloadProject/{id} - records one download and
 *   returns the file URLs with the new count
 * - GET /api/v1/projects/downloadCount/{id} - reads the count only
 */

use axum::extract::{Path, State};

use crate::backend::error::BackendError;
use crate::backend::projects::handlers::types::parse_project_id;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, DownloadCount, DownloadInfo};

pub async fn download_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DownloadInfo>, BackendError> {
    let id = parse_project_id(&id)?;
    let info = state
        .projects
        .record_download(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Project not found"))?;

    tracing::debug!("Project {} downloaded ({} total)", id, info.download_count);
    Ok(ApiResponse::ok(info, "Project download recorded"))
}

pub async fn download_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DownloadCount>, BackendError> {
    let id = parse_project_id(&id)?;
    let download_count = state
        .projects
        .download_count(id)
        .await?
        .ok_or_else(|| BackendError::not_found("Project not found"))?;

    Ok(ApiResponse::ok(
        DownloadCount { id, download_count },
        "Download count fetched successfully",
    ))
}
