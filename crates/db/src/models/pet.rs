//! Pet entity model and DTOs.

use pawhaven_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A `pets` row joined with its owner's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct PetRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub owner_username: String,
    pub owner_email: String,
    pub name: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub created_at: Timestamp,
}

/// Pet representation returned by the API.
///
/// `photo` is a storage reference (URL path), never inline bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub owner: UserSummary,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub available: bool,
    pub created_at: Timestamp,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: row.id,
            owner: UserSummary {
                id: row.owner_id,
                username: row.owner_username,
                email: row.owner_email,
            },
            name: row.name,
            pet_type: row.pet_type,
            breed: row.breed,
            age: row.age,
            gender: row.gender,
            purpose: row.purpose,
            description: row.description,
            photo: row.photo,
            available: row.available,
            created_at: row.created_at,
        }
    }
}

/// DTO for inserting a pet. `owner_id` always comes from the authenticated
/// requester.
#[derive(Debug, Clone)]
pub struct CreatePet {
    pub owner_id: DbId,
    pub name: String,
    pub pet_type: String,
    pub breed: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub available: Option<bool>,
}

/// DTO for updating a pet. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdatePet {
    pub name: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub available: Option<bool>,
}

/// Optional filters for listing pets.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub owner_id: Option<DbId>,
    pub pet_type: Option<String>,
    pub available: Option<bool>,
}
