//! Admin painting form: multipart parsing and working-set assembly.
//!
//! Create and update requests arrive as multipart bodies: a `painting` part
//! carrying the JSON form, plus one binary part per newly uploaded file,
//! referenced from the form by part name. The image entries are replayed
//! through the [`ImageSetEditor`] so the server applies the same working-set
//! rules as the admin UI (capacity, auto flags, exclusive primary/secondary,
//! dense positions).

use std::collections::HashMap;

use atelier_core::editor::{ImageSetEditor, NewUpload};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use axum::extract::Multipart;
use serde::Deserialize;
use validator::Validate;

use atelier_db::models::painting::{PaintingFields, PaintingStatus};

use crate::error::{AppError, AppResult};

/// The JSON form in the `painting` multipart part.
#[derive(Debug, Deserialize, Validate)]
pub struct PaintingForm {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub height_mm: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Width must be positive"))]
    pub width_mm: Option<f64>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: Option<f64>,
    pub status: PaintingStatus,
    pub medium: Option<String>,
    pub frame_included: Option<bool>,
    /// The full image set in display order.
    pub images: Vec<ImageFormEntry>,
}

impl PaintingForm {
    pub fn fields(&self) -> PaintingFields {
        PaintingFields {
            title: self.title.clone(),
            height_mm: self.height_mm,
            width_mm: self.width_mm,
            description: self.description.clone(),
            price: self.price,
            status: self.status,
            medium: self.medium.clone(),
            frame_included: self.frame_included,
        }
    }
}

/// One image in the submitted set: either kept from a previous save
/// (`id` + `image_url`) or newly uploaded (`upload` names a multipart part).
#[derive(Debug, Deserialize)]
pub struct ImageFormEntry {
    pub id: Option<DbId>,
    pub image_url: Option<String>,
    pub upload: Option<String>,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_secondary: bool,
}

/// A binary multipart part.
pub struct UploadPart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Read the full multipart body: the `painting` JSON form plus every file
/// part, keyed by part name.
pub async fn read_painting_form(
    mut multipart: Multipart,
) -> AppResult<(PaintingForm, HashMap<String, UploadPart>)> {
    let mut form: Option<PaintingForm> = None;
    let mut uploads = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field
            .name()
            .ok_or_else(|| AppError::BadRequest("Multipart part without a name".into()))?
            .to_string();

        if name == "painting" {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable painting part: {e}")))?;
            form = Some(
                serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid painting JSON: {e}")))?,
            );
        } else {
            let file_name = field.file_name().unwrap_or(&name).to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable file part '{name}': {e}")))?
                .to_vec();
            uploads.insert(name, UploadPart { file_name, bytes });
        }
    }

    let form = form.ok_or_else(|| AppError::BadRequest("Missing 'painting' part".into()))?;
    form.validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;
    Ok((form, uploads))
}

/// Replay the submitted image set through the editor and validate it.
///
/// Entries are applied in display order; explicit primary/secondary flags
/// from the form are applied after all entries exist so they override the
/// editor's add-time conveniences.
pub fn build_image_set(
    entries: &[ImageFormEntry],
    mut uploads: HashMap<String, UploadPart>,
) -> AppResult<ImageSetEditor> {
    let mut editor = ImageSetEditor::new();
    let mut primary_index = None;
    let mut secondary_index = None;

    for (index, entry) in entries.iter().enumerate() {
        match (entry.id, entry.upload.as_deref()) {
            (Some(id), None) => {
                let url = entry.image_url.clone().ok_or_else(|| {
                    AppError::BadRequest(format!("Kept image {id} is missing its image_url"))
                })?;
                editor.load_existing(id, url, entry.alt.clone(), false, false);
            }
            (None, Some(part_name)) => {
                let part = uploads.remove(part_name).ok_or_else(|| {
                    AppError::BadRequest(format!("Missing multipart part '{part_name}'"))
                })?;
                editor.add_files(vec![NewUpload {
                    file_name: part.file_name,
                    bytes: part.bytes,
                }])?;
                editor.set_alt(index, &entry.alt)?;
            }
            (Some(_), Some(_)) => {
                return Err(AppError::BadRequest(
                    "An image entry cannot be both kept and uploaded".into(),
                ));
            }
            (None, None) => {
                return Err(AppError::BadRequest(
                    "Each image entry needs either an id or an upload part name".into(),
                ));
            }
        }

        if entry.is_primary {
            primary_index = Some(index);
        }
        if entry.is_secondary {
            secondary_index = Some(index);
        }
    }

    if let Some(index) = primary_index {
        editor.set_primary(index)?;
    }
    if let Some(index) = secondary_index {
        editor.set_secondary(index)?;
    }

    editor.validate()?;
    Ok(editor)
}

fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
