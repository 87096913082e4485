/**
 * Local Media Store
 *
 * Writes uploaded files into a directory on disk. The router serves that
 * directory under `/uploads`, so the returned URL is
 * `{public_base_url}/uploads/{stored name}`.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use super::{sanitize_file_name, MediaError, MediaStore, UploadedFile};

#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = format!(
            "{}-{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(file.file_name.as_deref())
        );
        tokio::fs::write(self.dir.join(&stored_name), &file.bytes).await?;

        tracing::debug!("Stored upload {} ({} bytes)", stored_name, file.bytes.len());
        Ok(format!("{}/uploads/{}", self.public_base_url, stored_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().join("uploads"), "http://localhost:3000/");

        let url = store
            .upload(UploadedFile {
                file_name: Some("../src.zip".to_string()),
                content_type: Some("application/zip".to_string()),
                bytes: Bytes::from_static(b"zip-bytes"),
            })
            .await
            .unwrap();

        let prefix = "http://localhost:3000/uploads/";
        assert!(url.starts_with(prefix), "unexpected url {}", url);
        let stored_name = &url[prefix.len()..];
        assert!(stored_name.ends_with("-src.zip"));

        let contents = std::fs::read(store.dir().join(stored_name)).unwrap();
        assert_eq!(contents, b"zip-bytes");
    }

    #[tokio::test]
    async fn test_same_name_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "http://localhost:3000");
        let file = UploadedFile {
            file_name: Some("a.txt".to_string()),
            content_type: None,
            bytes: Bytes::from_static(b"a"),
        };

        let first = store.upload(file.clone()).await.unwrap();
        let second = store.upload(file).await.unwrap();
        assert_ne!(first, second);
    }
}
