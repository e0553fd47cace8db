//! Public gallery handlers. No authentication; hidden paintings are never
//! served here.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use atelier_db::repositories::GalleryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/gallery
///
/// Every available or sold painting, manual order first, newest first among
/// ties, with derived image fields.
pub async fn list_gallery(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let paintings = GalleryRepo::list_public(&state.pool).await?;

    Ok(Json(DataResponse { data: paintings }))
}

/// GET /api/v1/gallery/{slug}
///
/// Detail view of one public painting. `all_images` is returned in carousel
/// order (the secondary image first); stored positions are untouched.
pub async fn get_painting_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut painting = GalleryRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No painting with slug '{slug}'")))?;

    painting.all_images = painting.carousel_images();

    Ok(Json(DataResponse { data: painting }))
}
