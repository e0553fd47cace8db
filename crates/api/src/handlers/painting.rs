//! Admin painting handlers.
//!
//! All endpoints require the admin role. Mutations go through
//! [`CatalogService`] and invalidate the cached admin list; the reorder
//! endpoint patches the cache optimistically before persisting.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use atelier_core::types::DbId;
use atelier_db::models::painting::{PaintingStatus, SortUpdate};
use atelier_db::repositories::{GalleryRepo, PaintingRepo};

use crate::auth::AdminUser;
use crate::catalog::form::read_painting_form;
use crate::catalog::CatalogService;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/paintings
///
/// Every painting regardless of status, served from the cache when fresh.
pub async fn list_paintings(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if let Some(paintings) = state.admin_cache.get_fresh().await {
        return Ok(Json(DataResponse { data: paintings }));
    }

    let epoch = state.admin_cache.begin_fill().await;
    let paintings = GalleryRepo::list_admin(&state.pool).await?;
    state.admin_cache.fill(epoch, paintings.clone()).await;

    Ok(Json(DataResponse { data: paintings }))
}

/// GET /api/v1/admin/paintings/{id}
///
/// Edit view of one painting, any status.
pub async fn get_painting(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let painting = CatalogService::find(&state.pool, id).await?;

    Ok(Json(DataResponse { data: painting }))
}

/// POST /api/v1/admin/paintings
///
/// Create a painting from a multipart form (`painting` JSON part plus file
/// parts). Returns 201 with the assembled record.
pub async fn create_painting(
    admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (form, uploads) = read_painting_form(multipart).await?;

    let painting = CatalogService::create(&state.pool, state.blobs.as_ref(), &form, uploads).await?;
    state.admin_cache.invalidate().await;

    tracing::info!(id = painting.painting.id, user_id = admin.user_id, "Painting created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: painting })))
}

/// PUT /api/v1/admin/paintings/{id}
///
/// Update scalars and replace the image set from a multipart form.
pub async fn update_painting(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (form, uploads) = read_painting_form(multipart).await?;

    let painting =
        CatalogService::update(&state.pool, state.blobs.as_ref(), id, &form, uploads).await?;
    state.admin_cache.invalidate().await;

    tracing::info!(id, user_id = admin.user_id, "Painting updated");

    Ok(Json(DataResponse { data: painting }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: PaintingStatus,
}

/// PATCH /api/v1/admin/paintings/{id}/status
///
/// Set the status. Any status is reachable from any status.
pub async fn update_status(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    if !PaintingRepo::update_status(&state.pool, id, input.status).await? {
        return Err(AppError::Core(atelier_core::error::CoreError::NotFound {
            entity: "Painting",
            id,
        }));
    }
    state.admin_cache.invalidate().await;

    tracing::info!(id, user_id = admin.user_id, status = ?input.status, "Painting status changed");

    let painting = CatalogService::find(&state.pool, id).await?;
    Ok(Json(DataResponse { data: painting }))
}

/// PUT /api/v1/admin/paintings/reorder
///
/// Persist a new manual order. The cached admin list is patched and
/// re-sorted before the first write lands; if any write fails, the cache
/// rolls back to its pre-image and the error propagates. The cache is
/// marked stale either way, so the next list reconciles with the store.
pub async fn reorder_paintings(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(updates): Json<Vec<SortUpdate>>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.admin_cache.apply_sort_order(&updates).await;

    if let Err(e) = persist_sort_order(&state.pool, &updates).await {
        state.admin_cache.restore(snapshot).await;
        state.admin_cache.invalidate().await;
        return Err(e);
    }

    state.admin_cache.invalidate().await;

    tracing::info!(count = updates.len(), user_id = admin.user_id, "Paintings reordered");

    Ok(StatusCode::NO_CONTENT)
}

/// Write the new sort positions one by one, in request order.
async fn persist_sort_order(pool: &atelier_db::DbPool, updates: &[SortUpdate]) -> AppResult<()> {
    for update in updates {
        if !PaintingRepo::update_sort_index(pool, update.id, update.sort_index).await? {
            return Err(AppError::Core(atelier_core::error::CoreError::NotFound {
                entity: "Painting",
                id: update.id,
            }));
        }
    }
    Ok(())
}

/// DELETE /api/v1/admin/paintings/{id}
///
/// Delete a painting, its image rows and (best-effort) its blobs.
pub async fn delete_painting(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    CatalogService::delete(&state.pool, state.blobs.as_ref(), id).await?;
    state.admin_cache.invalidate().await;

    tracing::info!(id, user_id = admin.user_id, "Painting deleted");

    Ok(StatusCode::NO_CONTENT)
}
