/**
 * Project Records
 *
 * Data structures describing uploaded backend projects, as returned by the
 * project endpoints.
 *
 * # Shapes
 *
 * - `Project` - the stored record
 * - `ProjectWithOwner` - the record with the uploader joined in, used by the
 *   list and detail endpoints
 * - `DownloadInfo` / `DownloadCount` - download endpoint payloads
 * - `ProjectFilter` - optional list filters taken from the query string
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::user::PublicUser;

/// A stored project record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Implementation language, e.g. "Rust"
    pub language: String,
    /// Framework, e.g. "Axum"
    pub framework: String,
    pub github_url: String,
    /// Public URLs of the uploaded files (may be empty)
    pub file_urls: Vec<String>,
    /// Number of download requests served, never decreases
    pub download_count: i64,
    /// ID of the uploading user
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A project together with its uploader
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: Project,
    pub uploaded_by: PublicUser,
}

/// Payload of the download endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub id: Uuid,
    pub file_urls: Vec<String>,
    /// Counter value after this download was recorded
    pub download_count: i64,
}

/// Payload of the download count endpoint
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadCount {
    pub id: Uuid,
    pub download_count: i64,
}

/// Optional filters for the project list.
///
/// `search` matches title or description case-insensitively; `language` and
/// `framework` are case-insensitive exact matches. Blank values are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub framework: Option<String>,
}

impl ProjectFilter {
    /// Drop blank values and trim the rest.
    pub fn normalized(&self) -> Self {
        Self {
            search: crate::shared::error::non_blank(self.search.clone()),
            language: crate::shared::error::non_blank(self.language.clone()),
            framework: crate::shared::error::non_blank(self.framework.clone()),
        }
    }

    /// Whether a project passes every filter that is set.
    pub fn matches(&self, project: &Project) -> bool {
        let filter = self.normalized();

        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            if !project.title.to_lowercase().contains(&needle)
                && !project.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(language) = &filter.language {
            if !same_ignoring_case(&project.language, language) {
                return false;
            }
        }
        if let Some(framework) = &filter.framework {
            if !same_ignoring_case(&project.framework, framework) {
                return false;
            }
        }
        true
    }
}

/// Unicode lowercase comparison, the same rule as SQL `LOWER(a) = LOWER(b)`.
fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
