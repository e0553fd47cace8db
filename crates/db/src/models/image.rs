//! Painting image models.
//!
//! One row per image belonging to a painting. The image bytes themselves
//! live in the external blob store; `image_url` is the public location.

use atelier_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `painting_images` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PaintingImage {
    pub id: DbId,
    pub painting_id: DbId,
    pub image_url: String,
    pub alt: Option<String>,
    pub is_primary: bool,
    pub is_secondary: bool,
    /// Dense, zero-based order within the painting's image set.
    pub position: i32,
}

/// DTO for inserting one image row. Positions are assigned by the caller
/// from array order at insert time.
#[derive(Debug, Clone)]
pub struct NewPaintingImage {
    pub image_url: String,
    pub alt: Option<String>,
    pub is_primary: bool,
    pub is_secondary: bool,
    pub position: i32,
}
