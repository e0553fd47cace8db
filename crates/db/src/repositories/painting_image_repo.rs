//! Repository for the `painting_images` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{NewPaintingImage, PaintingImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, painting_id, image_url, alt, is_primary, is_secondary, position";

/// Row-level operations on a painting's image records.
///
/// There is no bulk insert: rows go in one at a time, in array order, so a
/// mid-batch failure leaves a deterministic prefix for the caller's
/// compensating action.
pub struct PaintingImageRepo;

impl PaintingImageRepo {
    /// Insert one image row.
    pub async fn insert(
        pool: &PgPool,
        painting_id: DbId,
        image: &NewPaintingImage,
    ) -> Result<PaintingImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO painting_images
                (painting_id, image_url, alt, is_primary, is_secondary, position)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaintingImage>(&query)
            .bind(painting_id)
            .bind(&image.image_url)
            .bind(&image.alt)
            .bind(image.is_primary)
            .bind(image.is_secondary)
            .bind(image.position)
            .fetch_one(pool)
            .await
    }

    /// Insert a full image set sequentially, positions already assigned by
    /// the caller from array order.
    pub async fn insert_set(
        pool: &PgPool,
        painting_id: DbId,
        images: &[NewPaintingImage],
    ) -> Result<Vec<PaintingImage>, sqlx::Error> {
        let mut inserted = Vec::with_capacity(images.len());
        for image in images {
            inserted.push(Self::insert(pool, painting_id, image).await?);
        }
        Ok(inserted)
    }

    /// List a painting's images ordered by position ascending.
    pub async fn list_by_painting(
        pool: &PgPool,
        painting_id: DbId,
    ) -> Result<Vec<PaintingImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM painting_images
             WHERE painting_id = $1
             ORDER BY position ASC"
        );
        sqlx::query_as::<_, PaintingImage>(&query)
            .bind(painting_id)
            .fetch_all(pool)
            .await
    }

    /// The blob URLs of a painting's images (for storage cleanup).
    pub async fn list_urls_by_painting(
        pool: &PgPool,
        painting_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT image_url FROM painting_images WHERE painting_id = $1")
                .bind(painting_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(url,)| url).collect())
    }

    /// Delete every image row belonging to a painting, returning the count.
    pub async fn delete_by_painting(pool: &PgPool, painting_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM painting_images WHERE painting_id = $1")
            .bind(painting_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
