//! Shared query parameter types for API handlers.
//!
//! Pagination fields are repeated per struct instead of `#[serde(flatten)]`,
//! which breaks numeric parsing under `serde_urlencoded`.

use pawhaven_core::pagination::{clamp_limit, clamp_offset, MAX_LIMIT};
use serde::Deserialize;

/// Clamped `(limit, offset)` ready for the repository layer. Without a
/// `limit` the whole listing is returned.
fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> (Option<i64>, i64) {
    (clamp_limit(limit, MAX_LIMIT), clamp_offset(offset))
}

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> (Option<i64>, i64) {
        resolve_page(self.limit, self.offset)
    }
}

/// Query parameters for `GET /pets` and `GET /pets/my-pets`.
#[derive(Debug, Default, Deserialize)]
pub struct PetListParams {
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    pub available: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PetListParams {
    pub fn page(&self) -> (Option<i64>, i64) {
        resolve_page(self.limit, self.offset)
    }
}

/// Query parameters for the adoption request listings.
#[derive(Debug, Default, Deserialize)]
pub struct AdoptionListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AdoptionListParams {
    pub fn page(&self) -> (Option<i64>, i64) {
        resolve_page(self.limit, self.offset)
    }
}
