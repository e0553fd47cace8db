pub mod gallery_repo;
pub mod painting_image_repo;
pub mod painting_repo;

pub use gallery_repo::GalleryRepo;
pub use painting_image_repo::PaintingImageRepo;
pub use painting_repo::PaintingRepo;
