//! Domain logic for the painting catalog.
//!
//! Everything in this crate is pure and synchronous: slug derivation,
//! image-set invariant checks, and the in-memory image-set editor used
//! while an admin is composing a painting. All I/O lives in `atelier-db`
//! and `atelier-storage`.

pub mod editor;
pub mod error;
pub mod image_set;
pub mod slug;
pub mod types;
