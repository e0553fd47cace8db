//! Request handlers, grouped by surface.

pub mod gallery;
pub mod painting;
