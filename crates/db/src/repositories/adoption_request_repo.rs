//! Repository for the `adoption_requests` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::adoption_request::{
    AdoptionRequest, AdoptionRequestFilter, AdoptionRequestRow, CreateAdoptionRequest,
    UpdateAdoptionRequest,
};

/// Projection over `ar` joined with the requester `u`, pet `p` and pet
/// owner `o`.
const COLUMNS: &str = "ar.id, ar.status, ar.message, ar.created_at, \
                       u.id AS user_id, u.username AS user_username, u.email AS user_email, \
                       p.id AS pet_id, o.id AS pet_owner_id, o.username AS pet_owner_username, \
                       o.email AS pet_owner_email, p.name AS pet_name, p.pet_type AS pet_type, \
                       p.breed AS pet_breed, p.age AS pet_age, p.gender AS pet_gender, \
                       p.purpose AS pet_purpose, p.description AS pet_description, \
                       p.photo AS pet_photo, p.available AS pet_available, \
                       p.created_at AS pet_created_at";

const JOINS: &str = "JOIN users u ON u.id = ar.user_id \
                     JOIN pets p ON p.id = ar.pet_id \
                     JOIN users o ON o.id = p.owner_id";

/// Provides CRUD operations for adoption requests.
pub struct AdoptionRequestRepo;

impl AdoptionRequestRepo {
    /// Insert a new request. The status is always the column default,
    /// `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdoptionRequest,
    ) -> Result<AdoptionRequest, sqlx::Error> {
        let query = format!(
            "WITH ar AS (
                INSERT INTO adoption_requests (user_id, pet_id, message)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {COLUMNS} FROM ar {JOINS}"
        );
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&query)
            .bind(input.user_id)
            .bind(input.pet_id)
            .bind(&input.message)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoption_requests ar {JOINS} WHERE ar.id = $1");
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(AdoptionRequest::from))
    }

    /// List requests matching `filter`, newest first. A `None` limit returns every row.
    pub async fn list(
        pool: &PgPool,
        filter: &AdoptionRequestFilter,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adoption_requests ar {JOINS}
             WHERE ($1::BIGINT IS NULL OR ar.user_id = $1)
               AND ($2::TEXT IS NULL OR ar.status = $2)
             ORDER BY ar.created_at DESC, ar.id DESC
             LIMIT $3::BIGINT OFFSET $4"
        );
        let rows = sqlx::query_as::<_, AdoptionRequestRow>(&query)
            .bind(filter.user_id)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AdoptionRequest::from).collect())
    }

    /// Update the free-text fields of a request. Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdoptionRequest,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "WITH ar AS (
                UPDATE adoption_requests SET message = COALESCE($2, message)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM ar {JOINS}"
        );
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&query)
            .bind(id)
            .bind(&input.message)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(AdoptionRequest::from))
    }

    /// Move a request from status `from` to `to`.
    ///
    /// The row only changes while it still holds `from`, so two concurrent
    /// transitions cannot both apply. Returns `None` when no row with that
    /// id and status exists. `ck_adoption_requests_status` still rejects
    /// values outside the enum.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<AdoptionRequest>, sqlx::Error> {
        let query = format!(
            "WITH ar AS (
                UPDATE adoption_requests SET status = $3
                WHERE id = $1 AND status = $2
                RETURNING *
             )
             SELECT {COLUMNS} FROM ar {JOINS}"
        );
        let row = sqlx::query_as::<_, AdoptionRequestRow>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(AdoptionRequest::from))
    }

    /// Delete a request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM adoption_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
