//! Read projections over paintings joined with their images.
//!
//! Two views share one assembly path: the public gallery (available and
//! sold only) and the admin list (every status). Both order by manual sort
//! position first, newest first among ties, and attach the derived
//! `primary_image` / `secondary_image` / `all_images` fields per record.

use std::collections::HashMap;

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::PaintingImage;
use crate::models::painting::{Painting, PaintingStatus, PaintingWithImages};

const PAINTING_COLUMNS: &str = "id, title, height_mm, width_mm, description, price, status, slug, \
                                sort_index, medium, frame_included, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, painting_id, image_url, alt, is_primary, is_secondary, position";

/// Catalog read projections.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Public projection: status in {available, sold}.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<PaintingWithImages>, sqlx::Error> {
        let query = format!(
            "SELECT {PAINTING_COLUMNS} FROM paintings
             WHERE status = ANY($1)
             ORDER BY sort_index ASC, created_at DESC"
        );
        let paintings = sqlx::query_as::<_, Painting>(&query)
            .bind(PaintingStatus::PUBLIC.to_vec())
            .fetch_all(pool)
            .await?;
        Self::attach_images(pool, paintings).await
    }

    /// Admin projection: every status, same ordering as the public view.
    pub async fn list_admin(pool: &PgPool) -> Result<Vec<PaintingWithImages>, sqlx::Error> {
        let query = format!(
            "SELECT {PAINTING_COLUMNS} FROM paintings
             ORDER BY sort_index ASC, created_at DESC"
        );
        let paintings = sqlx::query_as::<_, Painting>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_images(pool, paintings).await
    }

    /// Single painting by slug with derived fields, public statuses only.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PaintingWithImages>, sqlx::Error> {
        let query = format!(
            "SELECT {PAINTING_COLUMNS} FROM paintings
             WHERE slug = $1 AND status = ANY($2)"
        );
        let painting = sqlx::query_as::<_, Painting>(&query)
            .bind(slug)
            .bind(PaintingStatus::PUBLIC.to_vec())
            .fetch_optional(pool)
            .await?;

        match painting {
            Some(painting) => {
                let mut assembled = Self::attach_images(pool, vec![painting]).await?;
                Ok(assembled.pop())
            }
            None => Ok(None),
        }
    }

    /// Single painting by id with derived fields, any status (admin edit).
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PaintingWithImages>, sqlx::Error> {
        let query = format!("SELECT {PAINTING_COLUMNS} FROM paintings WHERE id = $1");
        let painting = sqlx::query_as::<_, Painting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match painting {
            Some(painting) => {
                let mut assembled = Self::attach_images(pool, vec![painting]).await?;
                Ok(assembled.pop())
            }
            None => Ok(None),
        }
    }

    /// Fetch images for the given paintings in one query and attach derived
    /// fields, preserving the paintings' order.
    async fn attach_images(
        pool: &PgPool,
        paintings: Vec<Painting>,
    ) -> Result<Vec<PaintingWithImages>, sqlx::Error> {
        if paintings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = paintings.iter().map(|p| p.id).collect();
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM painting_images
             WHERE painting_id = ANY($1)
             ORDER BY position ASC"
        );
        let images = sqlx::query_as::<_, PaintingImage>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_painting: HashMap<DbId, Vec<PaintingImage>> = HashMap::new();
        for image in images {
            by_painting.entry(image.painting_id).or_default().push(image);
        }

        Ok(paintings
            .into_iter()
            .map(|painting| {
                let images = by_painting.remove(&painting.id).unwrap_or_default();
                PaintingWithImages::assemble(painting, images)
            })
            .collect())
    }
}
