//! Repository for the `pets` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::{CreatePet, Pet, PetFilter, PetRow, UpdatePet};

/// Projection over `pets p JOIN users o` (the owner).
const COLUMNS: &str = "p.id, p.owner_id, o.username AS owner_username, o.email AS owner_email, \
                       p.name, p.pet_type, p.breed, p.age, p.gender, p.purpose, p.description, \
                       p.photo, p.available, p.created_at";

const OWNER_JOIN: &str = "JOIN users o ON o.id = p.owner_id";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet, returning it with its owner resolved.
    pub async fn create(pool: &PgPool, input: &CreatePet) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO pets (owner_id, name, pet_type, breed, age, gender, purpose,
                                  description, photo, available)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true))
                RETURNING *
             )
             SELECT {COLUMNS} FROM p {OWNER_JOIN}"
        );
        let row = sqlx::query_as::<_, PetRow>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.pet_type)
            .bind(&input.breed)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.purpose)
            .bind(&input.description)
            .bind(&input.photo)
            .bind(input.available)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a pet by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets p {OWNER_JOIN} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Pet::from))
    }

    /// List pets matching `filter`, newest first. A `None` limit returns every row.
    pub async fn list(
        pool: &PgPool,
        filter: &PetFilter,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets p {OWNER_JOIN}
             WHERE ($1::BIGINT IS NULL OR p.owner_id = $1)
               AND ($2::TEXT IS NULL OR p.pet_type = $2)
               AND ($3::BOOLEAN IS NULL OR p.available = $3)
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $4::BIGINT OFFSET $5"
        );
        let rows = sqlx::query_as::<_, PetRow>(&query)
            .bind(filter.owner_id)
            .bind(&filter.pet_type)
            .bind(filter.available)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Pet::from).collect())
    }

    /// Update a pet. Only non-`None` fields in `input` are applied.
    ///
    /// The owner and `created_at` are never touched. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePet,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE pets SET
                    name = COALESCE($2, name),
                    pet_type = COALESCE($3, pet_type),
                    breed = COALESCE($4, breed),
                    age = COALESCE($5, age),
                    gender = COALESCE($6, gender),
                    purpose = COALESCE($7, purpose),
                    description = COALESCE($8, description),
                    photo = COALESCE($9, photo),
                    available = COALESCE($10, available)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM p {OWNER_JOIN}"
        );
        let row = sqlx::query_as::<_, PetRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.pet_type)
            .bind(&input.breed)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.purpose)
            .bind(&input.description)
            .bind(&input.photo)
            .bind(input.available)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Pet::from))
    }

    /// Delete a pet and its adoption requests in one transaction.
    ///
    /// Returns `true` if the pet existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM adoption_requests WHERE pet_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
