//! Persistence Module
//!
//! Narrow persistence interfaces used by the handlers. The server picks an
//! implementation at startup:
//!
//! - PostgreSQL (`auth::users::PgUserStore`, `projects::db::PgProjectStore`)
//!   when `DATABASE_URL` is configured
//! - `memory::MemoryStore` otherwise, and in tests
//!
//! # Invariants
//!
//! - Emails are unique; a duplicate insert fails with `StoreError::Conflict`.
//! - A project always references an existing user.
//! - `record_download` increments the counter in a single atomic step.
//! - Updates and deletes check ownership in the same step as the write.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::{DownloadInfo, Project, ProjectFilter, ProjectWithOwner};

/// In-memory store
pub mod memory;

pub use memory::MemoryStore;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referential or check constraint violated
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// A user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// A project about to be inserted
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub language: String,
    pub framework: String,
    pub github_url: String,
    pub file_urls: Vec<String>,
    pub user_id: Uuid,
}

/// Fields an owner may change; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.github_url.is_none()
    }

    /// Apply the supplied fields to a project in place.
    pub fn apply(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(github_url) = &self.github_url {
            project.github_url = github_url.clone();
        }
    }
}

/// Outcome of a write restricted to the project's owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedWrite<T> {
    Done(T),
    NotFound,
    NotOwner,
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `Conflict` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Project record store
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a project with a zero download counter.
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError>;

    /// All projects matching `filter`, newest first, with their owners.
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectWithOwner>, StoreError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectWithOwner>, StoreError>;

    /// Apply `changes` if `owner_id` owns the project. The ownership check
    /// and the write are one operation.
    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<OwnedWrite<Project>, StoreError>;

    /// Remove the project if `owner_id` owns it.
    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<OwnedWrite<()>, StoreError>;

    /// Atomically add one to the download counter and return the files.
    async fn record_download(&self, id: Uuid) -> Result<Option<DownloadInfo>, StoreError>;

    async fn download_count(&self, id: Uuid) -> Result<Option<i64>, StoreError>;
}
