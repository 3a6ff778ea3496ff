//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod adoption_request_repo;
pub mod gallery_image_repo;
pub mod pet_repo;
pub mod session_repo;
pub mod user_repo;

pub use adoption_request_repo::AdoptionRequestRepo;
pub use gallery_image_repo::GalleryImageRepo;
pub use pet_repo::PetRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
