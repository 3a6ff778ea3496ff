//! Handlers for the `/adoption-requests` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pawhaven_core::adoption::AdoptionStatus;
use pawhaven_core::error::CoreError;
use pawhaven_core::policy::{authorize, Action, Entity};
use pawhaven_core::types::DbId;
use pawhaven_db::models::adoption_request::{
    AdoptionRequest, AdoptionRequestFilter, CreateAdoptionRequest, UpdateAdoptionRequest,
};
use pawhaven_db::repositories::{AdoptionRequestRepo, PetRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::query::AdoptionListParams;
use crate::state::AppState;

/// Request body for `POST /adoption-requests`.
///
/// Only the target pet and an optional message are read. The requester is
/// taken from the token and the status always starts `pending`; any `user`
/// or `status` keys in the body are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateAdoptionRequestBody {
    pub pet_id: DbId,
    pub message: Option<String>,
}

/// Request body for the generic admin `PUT /adoption-requests/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAdoptionRequestBody {
    pub message: Option<String>,
}

/// Request body for `PUT /adoption-requests/{id}/admin/adoption-requests`.
#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: String,
}

/// GET /api/adoption-requests
///
/// Admin-only listing of every request, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<AdoptionListParams>,
) -> AppResult<Json<Vec<AdoptionRequest>>> {
    authorize(
        Entity::AdoptionRequest,
        Action::List,
        &auth_user.requester(),
        None,
    )?;

    let filter = AdoptionRequestFilter {
        user_id: None,
        status: status_filter(params.status.as_deref())?,
    };
    let (limit, offset) = params.page();
    let requests = AdoptionRequestRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(requests))
}

/// GET /api/adoption-requests/my-adoption-requests
pub async fn my_requests(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<AdoptionListParams>,
) -> AppResult<Json<Vec<AdoptionRequest>>> {
    authorize(
        Entity::AdoptionRequest,
        Action::ListOwn,
        &auth_user.requester(),
        None,
    )?;

    let filter = AdoptionRequestFilter {
        user_id: Some(auth_user.user_id),
        status: status_filter(params.status.as_deref())?,
    };
    let (limit, offset) = params.page();
    let requests = AdoptionRequestRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(requests))
}

/// POST /api/adoption-requests
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(input): JsonBody<CreateAdoptionRequestBody>,
) -> AppResult<(StatusCode, Json<AdoptionRequest>)> {
    authorize(
        Entity::AdoptionRequest,
        Action::Create,
        &auth_user.requester(),
        None,
    )?;

    if PetRepo::find_by_id(&state.pool, input.pet_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::validation(
            "pet_id",
            format!("Invalid pk \"{}\" - object does not exist", input.pet_id),
        )));
    }

    let create = CreateAdoptionRequest {
        user_id: auth_user.user_id,
        pet_id: input.pet_id,
        message: input.message,
    };
    let request = AdoptionRequestRepo::create(&state.pool, &create).await?;

    tracing::info!(
        request_id = request.id,
        pet_id = request.pet.id,
        user_id = auth_user.user_id,
        "Adoption request created",
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/adoption-requests/{id}
///
/// Visible to the requester who made it and to admins.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdoptionRequest>> {
    let request = find_request(&state, id).await?;
    authorize(
        Entity::AdoptionRequest,
        Action::Retrieve,
        &auth_user.requester(),
        Some(request.user.id),
    )?;
    Ok(Json(request))
}

/// PUT /api/adoption-requests/{id}
///
/// Admin edit of the message. The status is left alone; it only moves
/// through [`set_status`].
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateAdoptionRequestBody>,
) -> AppResult<Json<AdoptionRequest>> {
    authorize(
        Entity::AdoptionRequest,
        Action::Update,
        &auth_user.requester(),
        None,
    )?;

    let update = UpdateAdoptionRequest {
        message: input.message,
    };
    let request = AdoptionRequestRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(request_id = id, user_id = auth_user.user_id, "Adoption request updated");
    Ok(Json(request))
}

/// DELETE /api/adoption-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let request = find_request(&state, id).await?;
    authorize(
        Entity::AdoptionRequest,
        Action::Delete,
        &auth_user.requester(),
        Some(request.user.id),
    )?;

    if !AdoptionRequestRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(request_id = id, user_id = auth_user.user_id, "Adoption request deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/adoption-requests/{id}/admin/adoption-requests
///
/// Admin status transition. Unknown values are rejected with 400 before
/// anything is written; moving out of a terminal state is a 409. Sending
/// the current status again succeeds without a write.
pub async fn set_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<SetStatusBody>,
) -> AppResult<Json<AdoptionRequest>> {
    authorize(
        Entity::AdoptionRequest,
        Action::SetStatus,
        &auth_user.requester(),
        None,
    )?;

    let request = find_request(&state, id).await?;
    let next: AdoptionStatus = input.status.parse()?;
    let current: AdoptionStatus = request.status.parse().map_err(|_| {
        AppError::InternalError(format!(
            "Adoption request {id} has unexpected stored status '{}'",
            request.status
        ))
    })?;

    let next = current.transition_to(next)?;
    if next == current {
        return Ok(Json(request));
    }

    let Some(request) =
        AdoptionRequestRepo::set_status(&state.pool, id, current.as_str(), next.as_str()).await?
    else {
        // Another admin moved or deleted the request after it was read.
        find_request(&state, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Adoption request {id} changed status concurrently"
        ))));
    };

    tracing::info!(
        request_id = id,
        admin_id = auth_user.user_id,
        from = %current,
        to = %next,
        "Adoption request status changed",
    );
    Ok(Json(request))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate an optional `?status=` filter, passing the canonical string on.
fn status_filter(raw: Option<&str>) -> Result<Option<String>, CoreError> {
    raw.map(|s| s.parse::<AdoptionStatus>().map(|st| st.as_str().to_string()))
        .transpose()
}

async fn find_request(state: &AppState, id: DbId) -> AppResult<AdoptionRequest> {
    AdoptionRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Entity::AdoptionRequest.name(),
        id,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_filter_accepts_known_values_only() {
        assert_eq!(status_filter(None).unwrap(), None);
        assert_eq!(
            status_filter(Some("approved")).unwrap().as_deref(),
            Some("approved")
        );
        assert_matches!(
            status_filter(Some("adopted")),
            Err(CoreError::Validation { field: "status", .. })
        );
    }
}
