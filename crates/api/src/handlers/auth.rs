//! Handlers for account registration and token issuance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use pawhaven_core::account::{validate_email, validate_username, MIN_PASSWORD_LENGTH};
use pawhaven_core::error::CoreError;
use pawhaven_core::types::Timestamp;
use pawhaven_db::models::session::CreateSession;
use pawhaven_db::models::user::{CreateUser, Profile, User};
use pawhaven_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /login` and `POST /token`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /token/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub user: Profile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create an account. New accounts are never staff.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    let username = input.username.trim();
    let email = input.email.trim();
    validate_username(username)?;
    validate_email(email)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)?;

    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with that username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            is_staff: false,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(Profile::from(&user))))
}

/// POST /api/login, POST /api/token
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid_credentials());
    }

    let response = issue_tokens(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(response))
}

/// POST /api/token/refresh
///
/// Exchange a valid refresh token for a new token pair. The presented
/// token's session is consumed, so each refresh token works once.
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (refresh, refresh_token_hash) = generate_refresh_token();
    let session = SessionRepo::rotate(
        &state.pool,
        &hash_refresh_token(&input.refresh),
        &refresh_token_hash,
        refresh_expiry(&state),
    )
    .await?
    .ok_or_else(invalid_refresh)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    token_response(&state, &user, refresh).map(Json)
}

/// POST /api/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a new session for `user` and return its token pair.
async fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let (refresh, refresh_token_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: refresh_expiry(state),
        },
    )
    .await?;

    token_response(state, user, refresh)
}

fn token_response(state: &AppState, user: &User, refresh: String) -> AppResult<TokenResponse> {
    let access = generate_access_token(user.id, &user.username, user.is_staff, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenResponse {
        access,
        refresh,
        user: Profile::from(user),
    })
}

fn refresh_expiry(state: &AppState) -> Timestamp {
    Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days)
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "No active account found with the given credentials".into(),
    ))
}

fn invalid_refresh() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Token is invalid or expired".into(),
    ))
}
