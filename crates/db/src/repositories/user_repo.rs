//! Repository for the `users` table.

use pawhaven_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};
use crate::repositories::SessionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, is_staff, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username violates `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, is_staff)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.is_staff)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's email. Returns `None` if no row with `id` exists.
    pub async fn update_email(
        pool: &PgPool,
        id: DbId,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET email = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user and everything that depends on them, in one transaction.
    ///
    /// Adoption requests authored by the user or targeting the user's pets
    /// are removed, the user's pets and sessions are removed, and gallery
    /// images they uploaded are kept with `uploaded_by` cleared.
    ///
    /// Returns `true` if the user existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let requests = sqlx::query(
            "DELETE FROM adoption_requests
             WHERE user_id = $1
                OR pet_id IN (SELECT id FROM pets WHERE owner_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let pets = sqlx::query("DELETE FROM pets WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let images =
            sqlx::query("UPDATE gallery_images SET uploaded_by = NULL WHERE uploaded_by = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

        let sessions = SessionRepo::delete_for_user(&mut *tx, id).await?;

        let user = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = id,
            adoption_requests = requests.rows_affected(),
            pets = pets.rows_affected(),
            gallery_images_orphaned = images.rows_affected(),
            sessions,
            "User deleted with dependents"
        );
        Ok(user.rows_affected() > 0)
    }
}
