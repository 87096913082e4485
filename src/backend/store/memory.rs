/**
 * In-Memory Store
 *
 * A `UserStore` + `ProjectStore` backed by hash maps behind one tokio
 * `RwLock`. Used when no database is configured and by the test suite.
 * Data is lost on restart.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::backend::store::{
    NewProject, NewUser, OwnedWrite, ProjectChanges, ProjectStore, StoreError, UserStore,
};
use crate::shared::{DownloadInfo, Project, ProjectFilter, ProjectWithOwner};

#[derive(Default)]
struct MemoryData {
    users: HashMap<Uuid, User>,
    /// Projects keyed by id, with an insertion sequence to break
    /// `created_at` ties when sorting.
    projects: HashMap<Uuid, (u64, Project)>,
    next_seq: u64,
}

impl MemoryData {
    fn with_owner(&self, project: &Project) -> Option<ProjectWithOwner> {
        let owner = self.users.get(&project.user_id)?;
        Some(ProjectWithOwner {
            project: project.clone(),
            uploaded_by: owner.to_public(),
        })
    }
}

/// Shared in-memory store; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut data = self.inner.write().await;

        if data.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let data = self.inner.read().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let data = self.inner.read().await;
        Ok(data.users.get(&id).cloned())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let mut data = self.inner.write().await;

        if !data.users.contains_key(&project.user_id) {
            return Err(StoreError::Constraint(
                "Project owner does not exist".to_string(),
            ));
        }

        let project = Project {
            id: Uuid::new_v4(),
            title: project.title,
            description: project.description,
            language: project.language,
            framework: project.framework,
            github_url: project.github_url,
            file_urls: project.file_urls,
            download_count: 0,
            user_id: project.user_id,
            created_at: Utc::now(),
        };
        let seq = data.next_seq;
        data.next_seq += 1;
        data.projects.insert(project.id, (seq, project.clone()));
        Ok(project)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectWithOwner>, StoreError> {
        let data = self.inner.read().await;

        let mut entries: Vec<&(u64, Project)> = data
            .projects
            .values()
            .filter(|(_, project)| filter.matches(project))
            .collect();
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        Ok(entries
            .into_iter()
            .filter_map(|(_, project)| data.with_owner(project))
            .collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectWithOwner>, StoreError> {
        let data = self.inner.read().await;
        Ok(data
            .projects
            .get(&id)
            .and_then(|(_, project)| data.with_owner(project)))
    }

    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<OwnedWrite<Project>, StoreError> {
        let mut data = self.inner.write().await;
        let Some((_, project)) = data.projects.get_mut(&id) else {
            return Ok(OwnedWrite::NotFound);
        };
        if project.user_id != owner_id {
            return Ok(OwnedWrite::NotOwner);
        }
        changes.apply(project);
        Ok(OwnedWrite::Done(project.clone()))
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<OwnedWrite<()>, StoreError> {
        let mut data = self.inner.write().await;
        let Some((_, project)) = data.projects.get(&id) else {
            return Ok(OwnedWrite::NotFound);
        };
        if project.user_id != owner_id {
            return Ok(OwnedWrite::NotOwner);
        }
        data.projects.remove(&id);
        Ok(OwnedWrite::Done(()))
    }

    async fn record_download(&self, id: Uuid) -> Result<Option<DownloadInfo>, StoreError> {
        // Read and increment under the same write guard.
        let mut data = self.inner.write().await;
        Ok(data.projects.get_mut(&id).map(|(_, project)| {
            project.download_count += 1;
            DownloadInfo {
                id: project.id,
                file_urls: project.file_urls.clone(),
                download_count: project.download_count,
            }
        }))
    }

    async fn download_count(&self, id: Uuid) -> Result<Option<i64>, StoreError> {
        let data = self.inner.read().await;
        Ok(data.projects.get(&id).map(|(_, project)| project.download_count))
    }
}
