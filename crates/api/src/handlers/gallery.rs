//! Handlers for the `/gallery` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawhaven_core::error::CoreError;
use pawhaven_core::gallery::validate_caption;
use pawhaven_core::policy::{authorize, Action, Entity};
use pawhaven_core::types::DbId;
use pawhaven_db::models::gallery_image::{CreateGalleryImage, GalleryImage, UpdateGalleryImage};
use pawhaven_db::repositories::GalleryImageRepo;

use crate::error::{AppError, AppResult};
use crate::forms::GalleryForm;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::storage::{discard, store_image, FOLDER_GALLERY};

/// GET /api/gallery
pub async fn list(
    State(state): State<AppState>,
    requester: MaybeAuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<GalleryImage>>> {
    authorize(
        Entity::GalleryImage,
        Action::List,
        &requester.requester(),
        None,
    )?;

    let (limit, offset) = params.page();
    let images = GalleryImageRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(images))
}

/// POST /api/gallery
///
/// Multipart form with a required `image` file and optional `caption`.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<GalleryImage>)> {
    authorize(
        Entity::GalleryImage,
        Action::Create,
        &auth_user.requester(),
        None,
    )?;

    let form = GalleryForm::from_multipart(multipart).await?;
    validate_caption(form.caption.as_deref())?;
    let upload = form
        .image
        .ok_or_else(|| CoreError::validation("image", "No file was submitted"))?;

    let image = store_image(
        state.storage.as_ref(),
        FOLDER_GALLERY,
        "image",
        &upload.bytes,
    )
    .await?;

    let create = CreateGalleryImage {
        image: image.clone(),
        caption: form.caption,
        uploaded_by: auth_user.user_id,
    };
    let created = match GalleryImageRepo::create(&state.pool, &create).await {
        Ok(created) => created,
        Err(e) => {
            discard(state.storage.as_ref(), &image).await;
            return Err(e.into());
        }
    };

    tracing::info!(image_id = created.id, user_id = auth_user.user_id, "Gallery image uploaded");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/gallery/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GalleryImage>> {
    let image = find_image(&state, id).await?;
    authorize(
        Entity::GalleryImage,
        Action::Retrieve,
        &auth_user.requester(),
        image.uploaded_by.as_ref().map(|u| u.id),
    )?;
    Ok(Json(image))
}

/// PUT /api/gallery/{id}
///
/// Replaces the caption and, when a new `image` is sent, the file.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<GalleryImage>> {
    let existing = find_image(&state, id).await?;
    authorize(
        Entity::GalleryImage,
        Action::Update,
        &auth_user.requester(),
        existing.uploaded_by.as_ref().map(|u| u.id),
    )?;

    let form = GalleryForm::from_multipart(multipart).await?;
    validate_caption(form.caption.as_deref())?;

    let image = match &form.image {
        Some(upload) => Some(
            store_image(
                state.storage.as_ref(),
                FOLDER_GALLERY,
                "image",
                &upload.bytes,
            )
            .await?,
        ),
        None => None,
    };

    let update = UpdateGalleryImage {
        image: image.clone(),
        caption: form.caption,
    };
    let updated = match GalleryImageRepo::update(&state.pool, id, &update).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(reference) = &image {
                discard(state.storage.as_ref(), reference).await;
            }
            return Err(e.into());
        }
    };

    let Some(updated) = updated else {
        if let Some(reference) = &image {
            discard(state.storage.as_ref(), reference).await;
        }
        return Err(not_found(id));
    };

    if image.is_some() {
        discard(state.storage.as_ref(), &existing.image).await;
    }

    tracing::info!(image_id = id, user_id = auth_user.user_id, "Gallery image updated");
    Ok(Json(updated))
}

/// DELETE /api/gallery/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_image(&state, id).await?;
    authorize(
        Entity::GalleryImage,
        Action::Delete,
        &auth_user.requester(),
        existing.uploaded_by.as_ref().map(|u| u.id),
    )?;

    if !GalleryImageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    discard(state.storage.as_ref(), &existing.image).await;

    tracing::info!(image_id = id, user_id = auth_user.user_id, "Gallery image deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_image(state: &AppState, id: DbId) -> AppResult<GalleryImage> {
    GalleryImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Entity::GalleryImage.name(),
        id,
    })
}
