//! Handlers for the `/pets` resource.
//!
//! Create and update take `multipart/form-data` so a photo can travel with
//! the text fields. The owner is always the authenticated requester; an
//! `owner` field in the form is ignored.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawhaven_core::error::CoreError;
use pawhaven_core::pet::{validate_pet_input, WriteMode};
use pawhaven_core::policy::{authorize, Action, Entity};
use pawhaven_core::types::DbId;
use pawhaven_db::models::pet::{CreatePet, Pet, PetFilter, UpdatePet};
use pawhaven_db::repositories::PetRepo;

use crate::error::{AppError, AppResult};
use crate::forms::PetForm;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::PetListParams;
use crate::state::AppState;
use crate::storage::{discard, store_image, FOLDER_PETS};

/// GET /api/pets
pub async fn list(
    State(state): State<AppState>,
    requester: MaybeAuthUser,
    Query(params): Query<PetListParams>,
) -> AppResult<Json<Vec<Pet>>> {
    authorize(Entity::Pet, Action::List, &requester.requester(), None)?;

    let filter = PetFilter {
        owner_id: None,
        pet_type: params.pet_type.clone(),
        available: params.available,
    };
    let (limit, offset) = params.page();
    let pets = PetRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(pets))
}

/// GET /api/pets/my-pets
pub async fn my_pets(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PetListParams>,
) -> AppResult<Json<Vec<Pet>>> {
    authorize(Entity::Pet, Action::ListOwn, &auth_user.requester(), None)?;

    let filter = PetFilter {
        owner_id: Some(auth_user.user_id),
        pet_type: params.pet_type.clone(),
        available: params.available,
    };
    let (limit, offset) = params.page();
    let pets = PetRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(pets))
}

/// POST /api/pets
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Pet>)> {
    authorize(Entity::Pet, Action::Create, &auth_user.requester(), None)?;

    let form = PetForm::from_multipart(multipart).await?;
    validate_pet_input(&form.input, WriteMode::Create)?;

    let photo = match &form.photo {
        Some(upload) => {
            Some(store_image(state.storage.as_ref(), FOLDER_PETS, "photo", &upload.bytes).await?)
        }
        None => None,
    };

    let input = form.input;
    let create = CreatePet {
        owner_id: auth_user.user_id,
        name: input.name.unwrap_or_default(),
        pet_type: input.pet_type.unwrap_or_default(),
        breed: input.breed,
        age: input.age.unwrap_or_default(),
        gender: input.gender,
        purpose: input.purpose,
        description: input.description,
        photo: photo.clone(),
        available: input.available,
    };

    let pet = match PetRepo::create(&state.pool, &create).await {
        Ok(pet) => pet,
        Err(e) => {
            if let Some(reference) = &photo {
                discard(state.storage.as_ref(), reference).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(pet_id = pet.id, owner_id = auth_user.user_id, "Pet created");
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /api/pets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    requester: MaybeAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Pet>> {
    let pet = find_pet(&state, id).await?;
    authorize(
        Entity::Pet,
        Action::Retrieve,
        &requester.requester(),
        Some(pet.owner.id),
    )?;
    Ok(Json(pet))
}

/// PUT /api/pets/{id}
///
/// Name, type and age must be supplied; other fields are optional.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Pet>> {
    apply_update(&state, &auth_user, id, multipart, WriteMode::Replace).await
}

/// PATCH /api/pets/{id}
pub async fn patch(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Pet>> {
    apply_update(&state, &auth_user, id, multipart, WriteMode::Partial).await
}

/// DELETE /api/pets/{id}
///
/// Only the owner may delete a pet. Admins get 403 like any other non-owner.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let pet = find_pet(&state, id).await?;
    authorize(
        Entity::Pet,
        Action::Delete,
        &auth_user.requester(),
        Some(pet.owner.id),
    )?;

    if !PetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(photo) = &pet.photo {
        discard(state.storage.as_ref(), photo).await;
    }

    tracing::info!(pet_id = id, user_id = auth_user.user_id, "Pet deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn apply_update(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
    multipart: Multipart,
    mode: WriteMode,
) -> AppResult<Json<Pet>> {
    let existing = find_pet(state, id).await?;
    authorize(
        Entity::Pet,
        Action::Update,
        &auth_user.requester(),
        Some(existing.owner.id),
    )?;

    let form = PetForm::from_multipart(multipart).await?;
    validate_pet_input(&form.input, mode)?;

    let photo = match &form.photo {
        Some(upload) => {
            Some(store_image(state.storage.as_ref(), FOLDER_PETS, "photo", &upload.bytes).await?)
        }
        None => None,
    };

    let input = form.input;
    let update = UpdatePet {
        name: input.name,
        pet_type: input.pet_type,
        breed: input.breed,
        age: input.age,
        gender: input.gender,
        purpose: input.purpose,
        description: input.description,
        photo: photo.clone(),
        available: input.available,
    };

    let updated = match PetRepo::update(&state.pool, id, &update).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(reference) = &photo {
                discard(state.storage.as_ref(), reference).await;
            }
            return Err(e.into());
        }
    };

    let Some(pet) = updated else {
        // Deleted between the lookup and the write.
        if let Some(reference) = &photo {
            discard(state.storage.as_ref(), reference).await;
        }
        return Err(not_found(id));
    };

    if let (Some(_), Some(old)) = (&photo, &existing.photo) {
        discard(state.storage.as_ref(), old).await;
    }

    tracing::info!(pet_id = id, user_id = auth_user.user_id, ?mode, "Pet updated");
    Ok(Json(pet))
}

async fn find_pet(state: &AppState, id: DbId) -> AppResult<Pet> {
    PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Entity::Pet.name(),
        id,
    })
}
