//! Blob store collaborator for painting images.
//!
//! Exposes the [`BlobStore`] provider trait plus two implementations: the
//! production S3 store and an in-memory store for tests. The store gives no
//! transactional guarantee linking blob state to database state; callers
//! treat removal as best-effort and record rows as authoritative.

mod memory;
mod s3;

pub use memory::MemoryBlobStore;
pub use s3::{S3BlobStore, S3Config};

use rand::distr::Alphanumeric;
use rand::Rng;

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Blob store configuration error: {0}")]
    Config(String),

    #[error("Upload of '{name}' failed: {message}")]
    Upload { name: String, message: String },
}

/// Object storage for image bytes.
///
/// `upload` returns the public URL of the stored object. `remove` is
/// best-effort by contract: failures are logged by implementations and never
/// surfaced, since the database row deletion they follow is authoritative.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn remove(&self, names: &[String]);
}

/// Derive a collision-resistant object name for an upload.
///
/// `{unix_millis}-{6 random alphanumerics}.{ext}`, keeping the original
/// file's extension (lowercased) when it has one.
pub fn unique_object_name(original_file_name: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    let millis = chrono::Utc::now().timestamp_millis();

    match original_file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{millis}-{suffix}.{}", ext.to_lowercase())
        }
        _ => format!("{millis}-{suffix}"),
    }
}

/// Guess a MIME type from an object or file name extension.
pub fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Extract the object name from a public blob URL (the last path segment,
/// ignoring any query string or fragment).
pub fn object_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name.to_string())
    }
}
