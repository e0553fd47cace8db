pub mod image;
pub mod painting;
