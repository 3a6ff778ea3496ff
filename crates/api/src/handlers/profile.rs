//! Handlers for the requester's own account (`/profile`).

use axum::extract::State;
use axum::Json;
use pawhaven_core::account::validate_email;
use pawhaven_core::error::CoreError;
use pawhaven_db::models::user::Profile;
use pawhaven_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /profile`. Only the email is editable.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Profile>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(Profile::from(&user)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JsonBody(input): JsonBody<UpdateProfileRequest>,
) -> AppResult<Json<Profile>> {
    let email = input.email.trim();
    validate_email(email)?;

    let user = UserRepo::update_email(&state.pool, auth_user.user_id, email)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(Profile::from(&user)))
}
