//! Gallery image model and DTOs.

use pawhaven_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A `gallery_images` row left-joined with the uploader, who may be gone.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryImageRow {
    pub id: DbId,
    pub image: String,
    pub caption: Option<String>,
    pub uploaded_at: Timestamp,
    pub uploader_id: Option<DbId>,
    pub uploader_username: Option<String>,
    pub uploader_email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub image: String,
    pub caption: Option<String>,
    pub uploaded_by: Option<UserSummary>,
    pub uploaded_at: Timestamp,
}

impl From<GalleryImageRow> for GalleryImage {
    fn from(row: GalleryImageRow) -> Self {
        let uploaded_by = match (row.uploader_id, row.uploader_username, row.uploader_email) {
            (Some(id), Some(username), Some(email)) => Some(UserSummary {
                id,
                username,
                email,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            image: row.image,
            caption: row.caption,
            uploaded_by,
            uploaded_at: row.uploaded_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGalleryImage {
    pub image: String,
    pub caption: Option<String>,
    pub uploaded_by: DbId,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGalleryImage {
    pub image: Option<String>,
    pub caption: Option<String>,
}
