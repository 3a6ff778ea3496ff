//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the query shape
//! - A `Serialize` entity struct used in API responses
//! - `Create*` / `Update*` DTOs consumed by the repositories

pub mod adoption_request;
pub mod gallery_image;
pub mod pet;
pub mod session;
pub mod user;
