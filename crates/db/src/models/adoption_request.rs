//! Adoption request model and DTOs.

use pawhaven_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::pet::Pet;
use crate::models::user::UserSummary;

/// An `adoption_requests` row joined with the requester, the pet, and the
/// pet's owner. Pet columns carry a `pet_` prefix.
#[derive(Debug, Clone, FromRow)]
pub struct AdoptionRequestRow {
    pub id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub user_id: DbId,
    pub user_username: String,
    pub user_email: String,
    pub pet_id: DbId,
    pub pet_owner_id: DbId,
    pub pet_owner_username: String,
    pub pet_owner_email: String,
    pub pet_name: String,
    pub pet_type: String,
    pub pet_breed: Option<String>,
    pub pet_age: i32,
    pub pet_gender: Option<String>,
    pub pet_purpose: Option<String>,
    pub pet_description: Option<String>,
    pub pet_photo: Option<String>,
    pub pet_available: bool,
    pub pet_created_at: Timestamp,
}

/// Adoption request representation returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AdoptionRequest {
    pub id: DbId,
    pub user: UserSummary,
    pub pet: Pet,
    /// One of `pending`, `approved`, `rejected` (enforced by
    /// `ck_adoption_requests_status`).
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

impl From<AdoptionRequestRow> for AdoptionRequest {
    fn from(row: AdoptionRequestRow) -> Self {
        Self {
            id: row.id,
            user: UserSummary {
                id: row.user_id,
                username: row.user_username,
                email: row.user_email,
            },
            pet: Pet {
                id: row.pet_id,
                owner: UserSummary {
                    id: row.pet_owner_id,
                    username: row.pet_owner_username,
                    email: row.pet_owner_email,
                },
                name: row.pet_name,
                pet_type: row.pet_type,
                breed: row.pet_breed,
                age: row.pet_age,
                gender: row.pet_gender,
                purpose: row.pet_purpose,
                description: row.pet_description,
                photo: row.pet_photo,
                available: row.pet_available,
                created_at: row.pet_created_at,
            },
            status: row.status,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// DTO for inserting a request. There is no status field: every request
/// starts `pending` via the column default.
#[derive(Debug, Clone)]
pub struct CreateAdoptionRequest {
    pub user_id: DbId,
    pub pet_id: DbId,
    pub message: Option<String>,
}

/// DTO for the admin's generic update. Status is deliberately absent; it
/// only changes through `AdoptionRequestRepo::set_status`.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdoptionRequest {
    pub message: Option<String>,
}

/// Optional filters for listing requests.
#[derive(Debug, Clone, Default)]
pub struct AdoptionRequestFilter {
    pub user_id: Option<DbId>,
    pub status: Option<String>,
}
