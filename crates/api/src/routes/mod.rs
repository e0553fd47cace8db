pub mod admin;
pub mod gallery;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /gallery                      public listing
/// /gallery/{slug}               public detail
///
/// /admin/paintings              list, create (admin only)
/// /admin/paintings/reorder      persist manual order (PUT)
/// /admin/paintings/{id}         get, update, delete
/// /admin/paintings/{id}/status  set status (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/gallery", gallery::router())
        .nest("/admin/paintings", admin::router())
}
