//! In-memory working set for a painting's images.
//!
//! The editor holds the image set while an admin composes or edits a
//! painting: pending uploads (raw bytes plus a preview resource) mixed with
//! already-persisted entries. It keeps positions dense and zero-based after
//! every structural change and enforces the single-primary / single-secondary
//! flags at mutation time, not just at validation time.
//!
//! Preview resources are RAII guards: a [`PreviewHandle`] acquired from a
//! [`PreviewRegistry`] is released when its entry is removed or when the
//! editor is dropped, so an abandoned edit session leaks nothing.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::CoreError;
use crate::image_set::{
    validate_image_set, ImageEntry, ImageSource, PendingUpload, MAX_IMAGES,
};
use crate::types::DbId;

/// Tracks live preview resources for one editing session.
#[derive(Debug, Default, Clone)]
pub struct PreviewRegistry {
    live: Arc<AtomicUsize>,
    next_id: Arc<AtomicU64>,
}

impl PreviewRegistry {
    /// Acquire a new preview resource. Released when the handle drops.
    pub fn acquire(&self) -> PreviewHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        PreviewHandle {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            live: Arc::clone(&self.live),
        }
    }

    /// Number of previews currently held.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// Guard for one preview resource.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A file handed to [`ImageSetEditor::add_files`].
#[derive(Debug)]
pub struct NewUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Ordered working set of image entries for one painting.
#[derive(Debug, Default)]
pub struct ImageSetEditor {
    registry: PreviewRegistry,
    entries: Vec<ImageEntry>,
}

impl ImageSetEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry handing out preview resources for this session.
    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seed the editor with an already-persisted image (edit flow).
    ///
    /// Entries keep their stored flags and alt text; position is re-derived
    /// from insertion order.
    pub fn load_existing(
        &mut self,
        id: DbId,
        url: String,
        alt: String,
        is_primary: bool,
        is_secondary: bool,
    ) {
        self.entries.push(ImageEntry {
            source: ImageSource::Existing { id, url },
            alt,
            is_primary,
            is_secondary,
            position: 0,
        });
        self.reindex();
    }

    /// Add newly uploaded files to the end of the set.
    ///
    /// Rejects the whole batch if it would push the set past [`MAX_IMAGES`].
    /// Conveniences: the first entry ever added is auto-flagged primary, and
    /// a single file added to a singleton set is auto-flagged secondary.
    /// These do not replace the explicit-flag checks the validator applies
    /// to larger sets.
    pub fn add_files(&mut self, files: Vec<NewUpload>) -> Result<(), CoreError> {
        if self.entries.len() + files.len() > MAX_IMAGES {
            return Err(CoreError::Validation(format!(
                "A maximum of {MAX_IMAGES} images is allowed"
            )));
        }

        let was_empty = self.entries.is_empty();
        let was_singleton = self.entries.len() == 1;
        let batch_len = files.len();

        for (i, file) in files.into_iter().enumerate() {
            self.entries.push(ImageEntry {
                source: ImageSource::Pending(PendingUpload {
                    file_name: file.file_name,
                    bytes: file.bytes,
                    preview: self.registry.acquire(),
                }),
                alt: String::new(),
                is_primary: was_empty && i == 0,
                is_secondary: was_singleton && batch_len == 1 && i == 0,
                position: 0,
            });
        }
        self.reindex();
        Ok(())
    }

    /// Drop the entry at `index`, releasing its preview if it was pending.
    ///
    /// If exactly one entry remains afterwards it is force-flagged primary,
    /// restoring the singleton invariant whichever entry was removed.
    pub fn remove(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_index(index)?;
        self.entries.remove(index);
        if let [survivor] = self.entries.as_mut_slice() {
            survivor.is_primary = true;
        }
        self.reindex();
        Ok(())
    }

    /// Flag the entry at `index` as primary, clearing the flag elsewhere.
    pub fn set_primary(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_index(index)?;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.is_primary = i == index;
        }
        Ok(())
    }

    /// Flag the entry at `index` as secondary, clearing the flag elsewhere.
    pub fn set_secondary(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_index(index)?;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.is_secondary = i == index;
        }
        Ok(())
    }

    /// Replace the alt text of the entry at `index`.
    pub fn set_alt(&mut self, index: usize, alt: &str) -> Result<(), CoreError> {
        self.check_index(index)?;
        self.entries[index].alt = alt.to_string();
        Ok(())
    }

    /// Move the entry at `from` to `to`, then re-derive dense positions from
    /// the final array order (never patch individual position values).
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
        self.reindex();
        Ok(())
    }

    /// Run the image-set invariant checks over the current working set.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_image_set(&self.entries)
    }

    /// Consume the editor, yielding the working set for persistence.
    ///
    /// Pending entries carry their preview handles out with them, so the
    /// previews stay alive exactly as long as the entries do.
    pub fn into_entries(self) -> Vec<ImageEntry> {
        self.entries
    }

    fn reindex(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.position = i as i32;
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Image index {index} out of range (set has {} entries)",
                self.entries.len()
            )))
        }
    }
}
