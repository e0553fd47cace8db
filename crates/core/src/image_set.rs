//! Image-set invariants for a painting.
//!
//! A painting carries between one and six images. A single image is
//! implicitly the primary regardless of its stored flag; larger sets need an
//! explicit primary and an explicit secondary, and the primary must carry
//! alt text. These rules are checked synchronously before every persist
//! attempt -- callers must not bypass them.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of images per painting.
pub const MAX_IMAGES: usize = 6;

/// A not-yet-persisted upload held by the editor.
#[derive(Debug)]
pub struct PendingUpload {
    /// Original client file name (used to derive the blob object name).
    pub file_name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Preview resource guard; released when the entry is dropped.
    pub preview: crate::editor::PreviewHandle,
}

/// Where an entry's image lives.
#[derive(Debug)]
pub enum ImageSource {
    /// Uploaded in this editing session, not yet in the blob store.
    Pending(PendingUpload),
    /// Already persisted: a `painting_images` row and a public URL.
    Existing { id: DbId, url: String },
}

impl ImageSource {
    /// The persisted row id, if this entry survives from a previous save.
    pub fn existing_id(&self) -> Option<DbId> {
        match self {
            ImageSource::Existing { id, .. } => Some(*id),
            ImageSource::Pending(_) => None,
        }
    }
}

/// One entry of the working image set.
#[derive(Debug)]
pub struct ImageEntry {
    pub source: ImageSource,
    pub alt: String,
    pub is_primary: bool,
    pub is_secondary: bool,
    /// Dense, zero-based display order within the set.
    pub position: i32,
}

/// Resolve which entry is the primary image.
///
/// A singleton set has an implicit primary (its sole entry, whatever its
/// stored flag says). Larger sets resolve only through the explicit flag.
pub fn resolve_primary(entries: &[ImageEntry]) -> Option<&ImageEntry> {
    match entries {
        [only] => Some(only),
        _ => entries.iter().find(|e| e.is_primary),
    }
}

/// Validate a candidate image set, returning the first violated rule.
///
/// Rules, in check order:
/// 1. at least one image
/// 2. at most [`MAX_IMAGES`]
/// 3. size > 1 requires an explicit primary
/// 4. size > 1 requires an explicit secondary
/// 5. the resolved primary must carry non-blank alt text
pub fn validate_image_set(entries: &[ImageEntry]) -> Result<(), CoreError> {
    if entries.is_empty() {
        return Err(CoreError::Validation(
            "At least one image is required".into(),
        ));
    }

    if entries.len() > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_IMAGES} images is allowed"
        )));
    }

    if entries.len() > 1 && !entries.iter().any(|e| e.is_primary) {
        return Err(CoreError::Validation(
            "A primary image must be selected".into(),
        ));
    }

    if entries.len() > 1 && !entries.iter().any(|e| e.is_secondary) {
        return Err(CoreError::Validation(
            "A secondary image must be selected".into(),
        ));
    }

    if let Some(primary) = resolve_primary(entries) {
        if primary.alt.trim().is_empty() {
            return Err(CoreError::Validation(
                "The primary image requires alt text".into(),
            ));
        }
    }

    Ok(())
}
