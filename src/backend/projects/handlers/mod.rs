//! Project Handlers Module
//!
//! # Handlers
//!
//! - **`create_project`** - POST /uploadproject (authenticated, multipart)
//! - **`list_projects`** - GET /allproject
//! - **`project_details`** - GET /projectDetails/{id}
//! - **`update_project`** - PATCH /updateProject/{id} (owner only)
//! - **`delete_project`** - DELETE /deleteProject/{id} (owner only)
//! - **`download_project`** - GET /downloadProject/{id}
//! - **`download_count`** - GET /downloadCount/{id}
//!
//! All paths are relative to `/api/v1/projects`.

/// Request and response types
pub mod types;

pub mod create;
pub mod delete;
pub mod download;
pub mod read;
pub mod update;

pub use create::create_project;
pub use delete::delete_project;
pub use download::{download_count, download_project};
pub use read::{list_projects, project_details};
pub use types::{parse_project_id, UpdateProjectRequest};
pub use update::update_project;
