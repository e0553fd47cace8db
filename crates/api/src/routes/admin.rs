//! Admin painting routes, mounted at `/admin/paintings`.
//!
//! Every handler extracts [`AdminUser`](crate::auth::AdminUser), so the
//! whole subtree requires an admin Bearer token.
//!
//! ```text
//! GET    /              -> list_paintings
//! POST   /              -> create_painting
//! PUT    /reorder       -> reorder_paintings
//! GET    /{id}          -> get_painting
//! PUT    /{id}          -> update_painting
//! DELETE /{id}          -> delete_painting
//! PATCH  /{id}/status   -> update_status
//! ```

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::painting;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(painting::list_paintings).post(painting::create_painting),
        )
        .route("/reorder", put(painting::reorder_paintings))
        .route(
            "/{id}",
            get(painting::get_painting)
                .put(painting::update_painting)
                .delete(painting::delete_painting),
        )
        .route("/{id}/status", patch(painting::update_status))
}
