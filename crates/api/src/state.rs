use std::sync::Arc;

use atelier_storage::BlobStore;

use crate::catalog::cache::AdminCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store for painting image bytes.
    pub blobs: Arc<dyn BlobStore>,
    /// Cached admin projection with optimistic reorder support.
    pub admin_cache: Arc<AdminCache>,
}
