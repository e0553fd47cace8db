//! Painting entity models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::image::PaintingImage;

/// Commercial / visibility state of a painting.
///
/// Transitions are unrestricted; the value only drives visibility
/// (public views show `available` and `sold`) and the sold badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "painting_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaintingStatus {
    Available,
    Sold,
    Hidden,
}

impl PaintingStatus {
    /// Statuses visible in the public gallery.
    pub const PUBLIC: [PaintingStatus; 2] = [PaintingStatus::Available, PaintingStatus::Sold];
}

/// A row from the `paintings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Painting {
    pub id: DbId,
    pub title: String,
    pub height_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub status: PaintingStatus,
    /// URL-safe unique identifier, derived at creation, immutable after.
    pub slug: String,
    /// Manual display order; ties broken by `created_at` descending.
    pub sort_index: i32,
    pub medium: Option<String>,
    pub frame_included: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Scalar painting fields supplied by the admin form on create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct PaintingFields {
    pub title: String,
    pub height_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub status: PaintingStatus,
    pub medium: Option<String>,
    pub frame_included: Option<bool>,
}

/// One entry of a painting-list reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct SortUpdate {
    pub id: DbId,
    pub sort_index: i32,
}

/// A painting with its derived image fields attached.
///
/// `primary_image`, `secondary_image`, and `all_images` are computed per
/// read, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct PaintingWithImages {
    #[serde(flatten)]
    pub painting: Painting,
    pub primary_image: Option<PaintingImage>,
    pub secondary_image: Option<PaintingImage>,
    /// Images ordered by position ascending.
    pub all_images: Vec<PaintingImage>,
}

impl PaintingWithImages {
    /// Attach derived image fields to a painting row.
    ///
    /// A single-image set resolves its primary implicitly, whatever the
    /// stored flag says; larger sets resolve through the explicit flag.
    pub fn assemble(painting: Painting, mut images: Vec<PaintingImage>) -> Self {
        images.sort_by_key(|img| img.position);
        let primary_image = match images.as_slice() {
            [only] => Some(only.clone()),
            _ => images.iter().find(|img| img.is_primary).cloned(),
        };
        let secondary_image = images.iter().find(|img| img.is_secondary).cloned();
        Self {
            painting,
            primary_image,
            secondary_image,
            all_images: images,
        }
    }

    /// `all_images` reordered for the detail carousel: the secondary-flagged
    /// image moves to the front. Display-time only; the persisted `position`
    /// values are untouched.
    pub fn carousel_images(&self) -> Vec<PaintingImage> {
        let mut images = self.all_images.clone();
        if let Some(idx) = images.iter().position(|img| img.is_secondary) {
            let secondary = images.remove(idx);
            images.insert(0, secondary);
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn painting() -> Painting {
        Painting {
            id: 1,
            title: "Harbour Light".into(),
            height_mm: Some(420.0),
            width_mm: Some(594.0),
            description: None,
            price: Some(4800.0),
            status: PaintingStatus::Available,
            slug: "harbour-light".into(),
            sort_index: 0,
            medium: Some("Acrylic".into()),
            frame_included: Some(false),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn image(id: DbId, primary: bool, secondary: bool, position: i32) -> PaintingImage {
        PaintingImage {
            id,
            painting_id: 1,
            image_url: format!("https://blobs.test/{id}.jpg"),
            alt: Some("alt".into()),
            is_primary: primary,
            is_secondary: secondary,
            position,
        }
    }

    #[test]
    fn assemble_sorts_all_images_by_position() {
        let view = PaintingWithImages::assemble(
            painting(),
            vec![image(3, false, false, 2), image(1, true, false, 0), image(2, false, true, 1)],
        );
        let ids: Vec<DbId> = view.all_images.iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn assemble_resolves_explicit_primary_and_secondary() {
        let view = PaintingWithImages::assemble(
            painting(),
            vec![image(1, false, true, 0), image(2, true, false, 1)],
        );
        assert_eq!(view.primary_image.as_ref().map(|img| img.id), Some(2));
        assert_eq!(view.secondary_image.as_ref().map(|img| img.id), Some(1));
    }

    #[test]
    fn single_image_is_implicitly_primary() {
        // Stored flag is false; the derivation overrides it.
        let view = PaintingWithImages::assemble(painting(), vec![image(1, false, false, 0)]);
        assert_eq!(view.primary_image.as_ref().map(|img| img.id), Some(1));
    }

    #[test]
    fn carousel_moves_secondary_to_front() {
        let view = PaintingWithImages::assemble(
            painting(),
            vec![image(1, true, false, 0), image(2, false, false, 1), image(3, false, true, 2)],
        );
        let ids: Vec<DbId> = view.carousel_images().iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        // Persisted order untouched.
        let stored: Vec<DbId> = view.all_images.iter().map(|img| img.id).collect();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[test]
    fn carousel_without_secondary_keeps_position_order() {
        let view = PaintingWithImages::assemble(
            painting(),
            vec![image(1, true, false, 0), image(2, false, false, 1)],
        );
        let ids: Vec<DbId> = view.carousel_images().iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
