//! Catalog write path and admin-list cache.

pub mod cache;
pub mod form;
pub mod service;

pub use cache::AdminCache;
pub use service::CatalogService;
