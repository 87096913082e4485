/**
 * Project Handler Types
 *
 * Request and response types for the project endpoints, plus the
 * validation that turns raw input into store commands.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::ProjectChanges;
use crate::shared::error::{non_blank, SharedError};

/// Name of the multipart part(s) carrying project files
pub const FILE_FIELD: &str = "fileUrl";

/// Text fields of the create form
#[derive(Debug, Default, Clone)]
pub struct ProjectForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub github_url: Option<String>,
}

/// Create form after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProjectForm {
    pub title: String,
    pub description: String,
    pub language: String,
    pub framework: String,
    pub github_url: String,
}

impl ProjectForm {
    /// Record a text field; unknown field names are ignored
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "language" => &mut self.language,
            "framework" => &mut self.framework,
            "githubUrl" => &mut self.github_url,
            _ => {
                tracing::debug!("Ignoring unknown form field: {}", name);
                return;
            }
        };
        *slot = Some(value);
    }

    /// Require every field to be present and non-blank
    pub fn validate(self) -> Result<ValidProjectForm, SharedError> {
        let required = |field: &str, value: Option<String>| {
            non_blank(value).ok_or_else(|| SharedError::validation(field, "All fields are required"))
        };

        Ok(ValidProjectForm {
            title: required("title", self.title)?,
            description: required("description", self.description)?,
            language: required("language", self.language)?,
            framework: required("framework", self.framework)?,
            github_url: required("githubUrl", self.github_url)?,
        })
    }
}

/// Update request body
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

impl UpdateProjectRequest {
    /// Keep the non-blank fields; at least one is required
    pub fn into_changes(self) -> Result<ProjectChanges, SharedError> {
        let changes = ProjectChanges {
            title: non_blank(self.title),
            description: non_blank(self.description),
            github_url: non_blank(self.github_url),
        };

        if changes.is_empty() {
            return Err(SharedError::validation(
                "title",
                "At least one of title, description or githubUrl is required",
            ));
        }
        Ok(changes)
    }
}

/// Delete response data
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedProject {
    pub id: Uuid,
}

/// Parse a project id path segment
pub fn parse_project_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        tracing::debug!("Rejected project id: {}", raw);
        BackendError::bad_request("Invalid project id")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn full_form() -> ProjectForm {
        let mut form = ProjectForm::default();
        form.set("title", "API".into());
        form.set("description", "A REST API".into());
        form.set("language", "Rust".into());
        form.set("framework", "Axum".into());
        form.set("githubUrl", "https://github.com/example/api".into());
        form
    }

    #[test]
    fn test_form_validation() {
        let valid = full_form().validate().unwrap();
        assert_eq!(valid.github_url, "https://github.com/example/api");
    }

    #[test]
    fn test_form_rejects_blank_field() {
        let mut form = full_form();
        form.set("framework", "  ".into());
        let err = form.validate().unwrap_err();
        assert_eq!(err.public_message(), "All fields are required");
    }

    #[test]
    fn test_form_ignores_unknown_fields() {
        let mut form = full_form();
        form.set("downloadCount", "999".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_update_keeps_only_supplied_fields() {
        let changes = UpdateProjectRequest {
            title: Some("New".into()),
            description: Some("   ".into()),
            github_url: None,
        }
        .into_changes()
        .unwrap();

        assert_eq!(changes.title.as_deref(), Some("New"));
        assert_eq!(changes.description, None);
    }

    #[test]
    fn test_update_requires_a_field() {
        assert!(UpdateProjectRequest::default().into_changes().is_err());
    }

    #[test]
    fn test_parse_project_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_project_id(&id.to_string()).unwrap(), id);
        assert_eq!(
            parse_project_id("not-a-uuid").unwrap_err().status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
