//! Multi-step persistence for paintings.
//!
//! A save touches two systems with no shared transaction: the blob store and
//! the database. Record rows are authoritative; blob operations are ordered
//! so a failure leaves either a clean store or orphaned blobs that a
//! compensating removal cleans up best-effort.

use atelier_core::error::CoreError;
use atelier_core::image_set::{ImageEntry, ImageSource};
use atelier_core::slug::slugify;
use atelier_core::types::DbId;
use atelier_db::models::image::NewPaintingImage;
use atelier_db::models::painting::PaintingWithImages;
use atelier_db::repositories::{GalleryRepo, PaintingImageRepo, PaintingRepo};
use atelier_db::DbPool;
use atelier_storage::{content_type_for, object_name_from_url, unique_object_name, BlobStore};

use crate::catalog::form::{build_image_set, PaintingForm, UploadPart};
use crate::error::AppResult;

/// Orchestrates painting saves across the database and the blob store.
pub struct CatalogService;

impl CatalogService {
    /// Create a painting from a validated form.
    ///
    /// Steps: derive a unique slug, upload the new blobs, insert the
    /// painting row, then the image rows. If a row insert fails after the
    /// painting exists, the painting is deleted again (compensating action)
    /// and the fresh blobs are removed best-effort.
    pub async fn create(
        pool: &DbPool,
        blobs: &dyn BlobStore,
        form: &PaintingForm,
        uploads: std::collections::HashMap<String, UploadPart>,
    ) -> AppResult<PaintingWithImages> {
        let editor = build_image_set(&form.images, uploads)?;

        let slug = match PaintingRepo::generate_unique_slug(pool, &form.title).await {
            Ok(slug) => slug,
            Err(e) => {
                // Uniqueness is still enforced by the slug constraint; a
                // collision surfaces as a 409.
                tracing::warn!(error = %e, "Slug probe failed, falling back to local slugify");
                match slugify(&form.title) {
                    s if s.is_empty() => "untitled".to_string(),
                    s => s,
                }
            }
        };

        let (rows, uploaded) = Self::upload_entries(blobs, editor.into_entries()).await?;

        let painting = match PaintingRepo::create(pool, &form.fields(), &slug).await {
            Ok(painting) => painting,
            Err(e) => {
                blobs.remove(&uploaded).await;
                return Err(e.into());
            }
        };

        match PaintingImageRepo::insert_set(pool, painting.id, &rows).await {
            Ok(images) => {
                tracing::info!(id = painting.id, slug = %painting.slug, "Created painting");
                Ok(PaintingWithImages::assemble(painting, images))
            }
            Err(e) => {
                tracing::error!(id = painting.id, error = %e, "Image insert failed, rolling back painting");
                if let Err(e) = PaintingRepo::delete(pool, painting.id).await {
                    tracing::error!(id = painting.id, error = %e, "Compensating delete failed");
                }
                blobs.remove(&uploaded).await;
                Err(e.into())
            }
        }
    }

    /// Update a painting and replace its image set.
    ///
    /// Scalars are written unconditionally (last writer wins, no version
    /// check). Blobs dropped from the set are removed, new ones uploaded,
    /// then the image rows are deleted and reinserted in display order.
    pub async fn update(
        pool: &DbPool,
        blobs: &dyn BlobStore,
        id: DbId,
        form: &PaintingForm,
        uploads: std::collections::HashMap<String, UploadPart>,
    ) -> AppResult<PaintingWithImages> {
        let editor = build_image_set(&form.images, uploads)?;

        let painting = PaintingRepo::update(pool, id, &form.fields())
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Painting",
                id,
            })?;

        let originals = PaintingImageRepo::list_by_painting(pool, id).await?;
        let entries = editor.into_entries();
        let kept: Vec<DbId> = entries
            .iter()
            .filter_map(|e| e.source.existing_id())
            .collect();

        let dropped: Vec<String> = originals
            .iter()
            .filter(|img| !kept.contains(&img.id))
            .filter_map(|img| object_name_from_url(&img.image_url))
            .collect();
        blobs.remove(&dropped).await;

        let (rows, uploaded) = Self::upload_entries(blobs, entries).await?;

        // Replace the whole set. Kept rows get new ids; display order and
        // flags come entirely from the submitted set.
        if let Err(e) = PaintingImageRepo::delete_by_painting(pool, id).await {
            blobs.remove(&uploaded).await;
            return Err(e.into());
        }
        let images = match PaintingImageRepo::insert_set(pool, id, &rows).await {
            Ok(images) => images,
            Err(e) => {
                blobs.remove(&uploaded).await;
                return Err(e.into());
            }
        };

        tracing::info!(id, "Updated painting");
        Ok(PaintingWithImages::assemble(painting, images))
    }

    /// Delete a painting, its image rows (FK cascade) and its blobs.
    ///
    /// Blob removal runs after the row delete and is best-effort; a blob
    /// store outage never blocks the delete.
    pub async fn delete(pool: &DbPool, blobs: &dyn BlobStore, id: DbId) -> AppResult<()> {
        let urls = PaintingImageRepo::list_urls_by_painting(pool, id).await?;

        if !PaintingRepo::delete(pool, id).await? {
            return Err(CoreError::NotFound {
                entity: "Painting",
                id,
            }
            .into());
        }

        let names: Vec<String> = urls.iter().filter_map(|u| object_name_from_url(u)).collect();
        blobs.remove(&names).await;

        tracing::info!(id, "Deleted painting");
        Ok(())
    }

    /// Admin edit view of a single painting.
    pub async fn find(pool: &DbPool, id: DbId) -> AppResult<PaintingWithImages> {
        GalleryRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Painting",
                    id,
                }
                .into()
            })
    }

    /// Upload every pending entry, yielding insert-ready rows in display
    /// order plus the names of the freshly created blobs.
    ///
    /// On a mid-batch upload failure the already-uploaded blobs are removed
    /// before the error propagates.
    async fn upload_entries(
        blobs: &dyn BlobStore,
        entries: Vec<ImageEntry>,
    ) -> AppResult<(Vec<NewPaintingImage>, Vec<String>)> {
        let mut rows = Vec::with_capacity(entries.len());
        let mut uploaded = Vec::new();

        for entry in entries {
            let image_url = match &entry.source {
                ImageSource::Existing { url, .. } => url.clone(),
                ImageSource::Pending(pending) => {
                    let name = unique_object_name(&pending.file_name);
                    let content_type = content_type_for(&name);
                    match blobs
                        .upload(&name, pending.bytes.clone(), content_type)
                        .await
                    {
                        Ok(url) => {
                            uploaded.push(name);
                            url
                        }
                        Err(e) => {
                            blobs.remove(&uploaded).await;
                            return Err(e.into());
                        }
                    }
                }
            };

            rows.push(NewPaintingImage {
                image_url,
                alt: if entry.alt.trim().is_empty() {
                    None
                } else {
                    Some(entry.alt.clone())
                },
                is_primary: entry.is_primary,
                is_secondary: entry.is_secondary,
                position: entry.position,
            });
        }

        Ok((rows, uploaded))
    }
}
