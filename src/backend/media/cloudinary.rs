/**
 * Cloudinary Media Store
 *
 * Uploads files with Cloudinary's unsigned upload API:
 *
 * ```text
 * POST {api_base}/v1_1/{cloud_name}/auto/upload
 * multipart: file=<bytes>, upload_preset=<preset>
 * ```
 *
 * The `auto` resource type lets Cloudinary accept archives and documents as
 * well as images. The response's `secure_url` is returned as the file URL.
 * Every request is bounded by the configured `timeout_secs`.
 */

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{sanitize_file_name, MediaError, MediaStore, UploadedFile};
use crate::backend::server::config::CloudinaryConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl CloudinaryStore {
    /// Build a store with its own HTTP client
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &CloudinaryConfig) -> Self {
        Self {
            client,
            upload_url: format!(
                "{}/v1_1/{}/auto/upload",
                config.api_base.trim_end_matches('/'),
                config.cloud_name
            ),
            upload_preset: config.upload_preset.clone(),
        }
    }
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    #[tracing::instrument(skip(self, file), fields(size = file.bytes.len()))]
    async fn upload(&self, file: UploadedFile) -> Result<String, MediaError> {
        let mut part = Part::stream(file.bytes)
            .file_name(sanitize_file_name(file.file_name.as_deref()));
        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Cloudinary upload failed with {}: {}", status, body);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: UploadResponse = response.json().await?;
        body.secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| MediaError::InvalidResponse("missing secure_url".to_string()))
    }
}
