//! Repository for the `paintings` table.

use atelier_core::slug::slugify;
use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::painting::{Painting, PaintingFields, PaintingStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, height_mm, width_mm, description, price, status, slug, \
                       sort_index, medium, frame_included, created_at, updated_at";

/// Provides CRUD and ordering operations for paintings.
pub struct PaintingRepo;

impl PaintingRepo {
    /// Insert a new painting, returning the created row.
    ///
    /// The slug is fixed here and never changes afterwards; `sort_index`
    /// takes the schema default and is adjusted by explicit reorders.
    pub async fn create(
        pool: &PgPool,
        fields: &PaintingFields,
        slug: &str,
    ) -> Result<Painting, sqlx::Error> {
        let query = format!(
            "INSERT INTO paintings
                (title, height_mm, width_mm, description, price, status, slug, medium, frame_included)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Painting>(&query)
            .bind(&fields.title)
            .bind(fields.height_mm)
            .bind(fields.width_mm)
            .bind(&fields.description)
            .bind(fields.price)
            .bind(fields.status)
            .bind(slug)
            .bind(&fields.medium)
            .bind(fields.frame_included)
            .fetch_one(pool)
            .await
    }

    /// Find a painting by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Painting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM paintings WHERE id = $1");
        sqlx::query_as::<_, Painting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a painting by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Painting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM paintings WHERE slug = $1");
        sqlx::query_as::<_, Painting>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Update all scalar fields of a painting unconditionally.
    ///
    /// Returns `None` if no row with the given `id` exists. The slug is
    /// immutable and not part of the update.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &PaintingFields,
    ) -> Result<Option<Painting>, sqlx::Error> {
        let query = format!(
            "UPDATE paintings SET
                title = $2,
                height_mm = $3,
                width_mm = $4,
                description = $5,
                price = $6,
                status = $7,
                medium = $8,
                frame_included = $9,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Painting>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(fields.height_mm)
            .bind(fields.width_mm)
            .bind(&fields.description)
            .bind(fields.price)
            .bind(fields.status)
            .bind(&fields.medium)
            .bind(fields.frame_included)
            .fetch_optional(pool)
            .await
    }

    /// Set the status. Any status is reachable from any status; there is no
    /// transition guard. Returns `true` if a row was updated.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: PaintingStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE paintings SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the manual sort position of a single painting.
    pub async fn update_sort_index(
        pool: &PgPool,
        id: DbId,
        sort_index: i32,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE paintings SET sort_index = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(sort_index)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a painting. The FK cascade removes its image rows; blob
    /// cleanup is the caller's job. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM paintings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM paintings WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Derive a slug from `title` that is unique among existing paintings.
    ///
    /// Probes `base`, `base-2`, `base-3`, ... against the store. This is the
    /// preferred slug source; callers fall back to the local [`slugify`]
    /// (which guarantees nothing) only when the store is unreachable.
    pub async fn generate_unique_slug(pool: &PgPool, title: &str) -> Result<String, sqlx::Error> {
        let base = match slugify(title) {
            s if s.is_empty() => "untitled".to_string(),
            s => s,
        };

        if !Self::slug_exists(pool, &base).await? {
            return Ok(base);
        }
        for n in 2..=1000u32 {
            let candidate = format!("{base}-{n}");
            if !Self::slug_exists(pool, &candidate).await? {
                return Ok(candidate);
            }
        }
        // A thousand collisions on one title means something else is wrong;
        // a timestamp suffix keeps the insert from failing outright.
        Ok(format!("{base}-{}", chrono::Utc::now().timestamp_millis()))
    }
}
