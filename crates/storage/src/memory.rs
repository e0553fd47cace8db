//! In-memory blob store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{BlobStore, StorageError};

/// Stores blobs in a map and serves URLs under a fake host. Can be told to
/// fail uploads, to exercise compensation paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_uploads: Mutex<bool>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail.
    pub fn fail_uploads(&self, fail: bool) {
        *self.fail_uploads.lock().unwrap() = fail;
    }

    /// Object names currently held.
    pub fn object_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if *self.fail_uploads.lock().unwrap() {
            return Err(StorageError::Upload {
                name: name.to_string(),
                message: "simulated upload failure".into(),
            });
        }
        self.objects.lock().unwrap().insert(name.to_string(), bytes);
        Ok(format!("https://blobs.test/{name}"))
    }

    async fn remove(&self, names: &[String]) {
        let mut objects = self.objects.lock().unwrap();
        for name in names {
            objects.remove(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_remove_round_trip() {
        let store = MemoryBlobStore::new();
        let url = store.upload("a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();
        assert_eq!(url, "https://blobs.test/a.jpg");
        assert_eq!(store.len(), 1);

        store.remove(&["a.jpg".to_string(), "missing.jpg".to_string()]).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn simulated_failure() {
        let store = MemoryBlobStore::new();
        store.fail_uploads(true);
        assert!(store.upload("a.jpg", vec![], "image/jpeg").await.is_err());
        assert!(store.is_empty());
    }
}
