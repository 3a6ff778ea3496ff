//! Repository for the `gallery_images` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::gallery_image::{
    CreateGalleryImage, GalleryImage, GalleryImageRow, UpdateGalleryImage,
};

const COLUMNS: &str = "g.id, g.image, g.caption, g.uploaded_at, \
                       u.id AS uploader_id, u.username AS uploader_username, \
                       u.email AS uploader_email";

const UPLOADER_JOIN: &str = "LEFT JOIN users u ON u.id = g.uploaded_by";

/// Provides CRUD operations for gallery images.
pub struct GalleryImageRepo;

impl GalleryImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        let query = format!(
            "WITH g AS (
                INSERT INTO gallery_images (image, caption, uploaded_by)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {COLUMNS} FROM g {UPLOADER_JOIN}"
        );
        let row = sqlx::query_as::<_, GalleryImageRow>(&query)
            .bind(&input.image)
            .bind(&input.caption)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM gallery_images g {UPLOADER_JOIN} WHERE g.id = $1");
        let row = sqlx::query_as::<_, GalleryImageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(GalleryImage::from))
    }

    /// List images, newest first. A `None` limit returns every row.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_images g {UPLOADER_JOIN}
             ORDER BY g.uploaded_at DESC, g.id DESC
             LIMIT $1::BIGINT OFFSET $2"
        );
        let rows = sqlx::query_as::<_, GalleryImageRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(GalleryImage::from).collect())
    }

    /// Update an image. Only non-`None` fields are applied; the uploader is
    /// never changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryImage,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "WITH g AS (
                UPDATE gallery_images SET
                    image = COALESCE($2, image),
                    caption = COALESCE($3, caption)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM g {UPLOADER_JOIN}"
        );
        let row = sqlx::query_as::<_, GalleryImageRow>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(&input.caption)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(GalleryImage::from))
    }

    /// Delete an image row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
