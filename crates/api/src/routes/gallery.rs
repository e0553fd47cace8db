//! Public gallery routes, mounted at `/gallery`.
//!
//! ```text
//! GET /         -> list_gallery
//! GET /{slug}   -> get_painting_by_slug
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery))
        .route("/{slug}", get(gallery::get_painting_by_slug))
}
