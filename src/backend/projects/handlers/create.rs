/**
 * Create Project Handler
 *
 * POST /api/v1/projects/uploadproject (authenticated, multipart)
 *
 * # Process
 *
 * 1. Read the multipart body: text fields plus up to `max_files` parts
 *    named `fileUrl`
 * 2. Validate the text fields
 * 3. Confirm the caller still exists
 * 4. Upload every file through the media store
 * 5. Insert the project with the returned URLs
 *
 * Any upload failure aborts the request before anything is stored.
 */

use axum::extract::{Multipart, State};

use crate::backend::error::BackendError;
use crate::backend::media::UploadedFile;
use crate::backend::middleware::AuthUser;
use crate::backend::projects::handlers::types::{ProjectForm, FILE_FIELD};
use crate::backend::server::state::AppState;
use crate::backend::store::{NewProject, StoreError};
use crate::shared::{ApiResponse, Project};

/// Split a multipart body into text fields and files
async fn read_form(
    multipart: &mut Multipart,
    max_files: usize,
) -> Result<(ProjectForm, Vec<UploadedFile>), BackendError> {
    let mut form = ProjectForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == FILE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;

            // Browsers send an empty part for an untouched file input.
            if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                continue;
            }
            if files.len() >= max_files {
                return Err(BackendError::bad_request(format!(
                    "At most {} files may be uploaded",
                    max_files
                )));
            }
            files.push(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await?;
            form.set(&name, value);
        }
    }

    Ok((form, files))
}

/// Create project handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, too many files, malformed multipart
/// * `401 Unauthorized` - Rejected by the auth middleware
/// * `404 Not Found` - The caller's user record no longer exists
/// * `413 Payload Too Large` - Body exceeds `max_upload_bytes`
/// * `502 Bad Gateway` - A file could not be stored
pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<ApiResponse<Project>, BackendError> {
    let (form, files) = read_form(&mut multipart, state.config.uploads.max_files).await?;
    let form = form.validate()?;

    if state.users.find_user_by_id(user.id).await?.is_none() {
        tracing::warn!("Project upload for missing user {}", user.id);
        return Err(BackendError::not_found("User not found"));
    }

    let mut file_urls = Vec::with_capacity(files.len());
    for file in files {
        let url = state.media.upload(file).await.map_err(|e| {
            tracing::error!("File upload failed for user {}: {}", user.id, e);
            e
        })?;
        file_urls.push(url);
    }

    let project = state
        .projects
        .create_project(NewProject {
            title: form.title,
            description: form.description,
            language: form.language,
            framework: form.framework,
            github_url: form.github_url,
            file_urls,
            user_id: user.id,
        })
        .await
        .map_err(|e| match e {
            StoreError::Constraint(_) => BackendError::not_found("User not found"),
            other => other.into(),
        })?;

    tracing::info!(
        "Project {} created by {} with {} file(s)",
        project.id,
        user.id,
        project.file_urls.len()
    );
    Ok(ApiResponse::created(project, "Project created successfully"))
}
