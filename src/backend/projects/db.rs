/**
 * Project Database Operations
 *
 * PostgreSQL implementation of `ProjectStore`.
 *
 * # Tables
 *
 * - `projects` - one row per project; `user_id` references `users(id)` with
 *   `ON DELETE CASCADE`
 *
 * Reads that return the uploader join `users` in the same query.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::{NewProject, OwnedWrite, ProjectChanges, ProjectStore, StoreError};
use crate::shared::{DownloadInfo, Project, ProjectFilter, ProjectWithOwner, PublicUser};

const PROJECT_COLUMNS: &str = "p.id, p.title, p.description, p.language, p.framework, \
     p.github_url, p.file_urls, p.download_count, p.user_id, p.created_at";

/// Row shape of the `projects` table
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: String,
    language: String,
    framework: String,
    github_url: String,
    file_urls: Vec<String>,
    download_count: i64,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            language: row.language,
            framework: row.framework,
            github_url: row.github_url,
            file_urls: row.file_urls,
            download_count: row.download_count,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

/// A project row joined with its owner
#[derive(Debug, sqlx::FromRow)]
struct OwnedProjectRow {
    #[sqlx(flatten)]
    project: ProjectRow,
    owner_name: String,
    owner_email: String,
    owner_created_at: DateTime<Utc>,
}

impl From<OwnedProjectRow> for ProjectWithOwner {
    fn from(row: OwnedProjectRow) -> Self {
        let uploaded_by = PublicUser {
            id: row.project.user_id,
            name: row.owner_name,
            email: row.owner_email,
            created_at: row.owner_created_at,
        };
        ProjectWithOwner {
            project: row.project.into(),
            uploaded_by,
        }
    }
}

fn owned_select(where_clause: &str) -> String {
    format!(
        "SELECT {PROJECT_COLUMNS}, u.name AS owner_name, u.email AS owner_email, \
         u.created_at AS owner_created_at \
         FROM projects p JOIN users u ON u.id = p.user_id {where_clause}"
    )
}

/// PostgreSQL-backed project store
#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Classify an owner-restricted write that touched no row.
    async fn missed_write<T>(&self, id: Uuid) -> Result<OwnedWrite<T>, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            OwnedWrite::NotOwner
        } else {
            OwnedWrite::NotFound
        })
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    /// Insert a new project
    ///
    /// # Returns
    /// Created project, or `StoreError::Constraint` if the owner is missing
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let result = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects
                (id, title, description, language, framework, github_url, file_urls, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, language, framework, github_url,
                      file_urls, download_count, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.language)
        .bind(&project.framework)
        .bind(&project.github_url)
        .bind(&project.file_urls)
        .bind(project.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => Err(
                StoreError::Constraint("Project owner does not exist".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// List projects, newest first
    ///
    /// Null parameters disable the corresponding filter.
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectWithOwner>, StoreError> {
        let filter = filter.normalized();
        let sql = owned_select(
            r#"
            WHERE ($1::TEXT IS NULL
                   OR POSITION(LOWER($1) IN LOWER(p.title)) > 0
                   OR POSITION(LOWER($1) IN LOWER(p.description)) > 0)
              AND ($2::TEXT IS NULL OR LOWER(p.language) = LOWER($2))
              AND ($3::TEXT IS NULL OR LOWER(p.framework) = LOWER($3))
            ORDER BY p.created_at DESC
            "#,
        );

        let rows = sqlx::query_as::<_, OwnedProjectRow>(&sql)
            .bind(filter.search)
            .bind(filter.language)
            .bind(filter.framework)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectWithOwner>, StoreError> {
        let sql = owned_select("WHERE p.id = $1");
        let row = sqlx::query_as::<_, OwnedProjectRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// The owner predicate is part of the UPDATE itself.
    async fn update_project(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<OwnedWrite<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                github_url = COALESCE($4, github_url)
            WHERE id = $1 AND user_id = $5
            RETURNING id, title, description, language, framework, github_url,
                      file_urls, download_count, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.github_url)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(OwnedWrite::Done(row.into())),
            None => self.missed_write(id).await,
        }
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<OwnedWrite<()>, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(OwnedWrite::Done(()))
        } else {
            self.missed_write(id).await
        }
    }

    /// Increment the download counter in a single statement
    async fn record_download(&self, id: Uuid) -> Result<Option<DownloadInfo>, StoreError> {
        let row = sqlx::query_as::<_, (Uuid, Vec<String>, i64)>(
            r#"
            UPDATE projects
            SET download_count = download_count + 1
            WHERE id = $1
            RETURNING id, file_urls, download_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, file_urls, download_count)| DownloadInfo {
            id,
            file_urls,
            download_count,
        }))
    }

    async fn download_count(&self, id: Uuid) -> Result<Option<i64>, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT download_count FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(count)
    }
}
