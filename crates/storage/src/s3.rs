//! S3-backed blob store.

use aws_sdk_s3::primitives::ByteStream;

use crate::{BlobStore, StorageError};

/// S3 blob store configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket holding painting images.
    pub bucket: String,
    /// Key prefix within the bucket (default: `paintings`).
    pub prefix: String,
    /// Base URL under which uploaded objects are publicly reachable.
    pub public_base_url: String,
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                      |
    /// |-----------------------|----------|----------------------------------------------|
    /// | `S3_BUCKET`           | **yes**  | --                                           |
    /// | `S3_PREFIX`           | no       | `paintings`                                  |
    /// | `S3_PUBLIC_BASE_URL`  | no       | `https://{bucket}.s3.amazonaws.com/{prefix}` |
    ///
    /// Region and credentials come from the standard AWS environment.
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| StorageError::Config("S3_BUCKET must be set".into()))?;
        let prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| "paintings".into());
        let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com/{prefix}"));
        Ok(Self {
            bucket,
            prefix,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Production blob store backed by S3 (or any S3-compatible endpoint).
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    config: S3Config,
}

impl S3BlobStore {
    /// Build a client from the ambient AWS configuration.
    pub async fn new(config: S3Config) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            config,
        }
    }

    fn key_for(&self, name: &str) -> String {
        if self.config.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.config.prefix)
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(self.key_for(name))
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(format!("{}/{name}", self.config.public_base_url))
    }

    async fn remove(&self, names: &[String]) {
        // Best-effort: record deletion is authoritative, orphaned blobs are
        // a cleanup-later concern.
        for name in names {
            if let Err(e) = self
                .client
                .delete_object()
                .bucket(&self.config.bucket)
                .key(self.key_for(name))
                .send()
                .await
            {
                tracing::warn!(object = %name, error = %e, "Failed to delete blob");
            }
        }
    }
}
