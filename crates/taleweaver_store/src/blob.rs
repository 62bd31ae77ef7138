//! HTTP bucket blob store.
//!
//! Uploads go to `{base}/storage/v1/object/{bucket}/{path}` with the
//! service credential; the public URL for a path is derivable without a
//! network call and stays stable across re-uploads.

use async_trait::async_trait;
use reqwest::Client;
use taleweaver_error::{StorageError, StorageErrorKind, TaleweaverResult};
use taleweaver_interface::BlobStore;
use tracing::{debug, error, instrument};

/// Object-storage client for a single shared bucket.
#[derive(Debug, Clone)]
pub struct BucketBlobStore {
    client: Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl BucketBlobStore {
    /// Create a client for the given storage endpoint and bucket.
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            service_key: service_key.into(),
        }
    }

    fn validate_path(path: &str) -> TaleweaverResult<()> {
        if path.is_empty() || path.starts_with('/') || path.contains("..") {
            Err(StorageError::new(StorageErrorKind::InvalidPath(
                path.to_string(),
            )))?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for BucketBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> TaleweaverResult<()> {
        Self::validate_path(path)?;
        debug!(path, content_type, "Uploading blob");

        let url = format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("x-upsert", "true")
            .header("content-type", content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, path, "Blob upload request failed");
                StorageError::new(StorageErrorKind::Unavailable(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, body = %message, path, "Storage service rejected upload");
            Err(StorageError::new(StorageErrorKind::Rejected {
                status,
                message,
            }))?;
        }

        debug!(path, "Blob uploaded");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url, self.bucket
        )
    }
}
