use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    auth::password::hash_password,
    auth::repo_types::User,
    error::ApiError,
    state::AppState,
    users::dto::{
        CheckRequest, CheckResponse, ProfileResponse, UpdateProfileRequest, UpdateProfileResponse,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", post(check))
        .route(
            "/profile/:username",
            get(get_profile).put(update_profile),
        )
}

/// Existence probe for the registration form.
#[instrument(skip(state, payload))]
pub async fn check(
    State(state): State<AppState>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let username_exists = User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some();
    let email_exists = User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some();
    Ok(Json(CheckResponse {
        username_exists,
        email_exists,
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(ProfileResponse { user: user.into() }))
}

/// Only the authenticated user may update their own profile. A provided
/// password is rehashed; absent fields keep their current value.
#[instrument(skip(state, auth_user, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(auth_user): AuthUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    if user_id != auth_user.user_id {
        warn!(
            user_id = auth_user.user_id,
            target = user_id,
            "profile update for another user rejected"
        );
        return Err(ApiError::Forbidden(
            "Forbidden: You can only update your own profile.",
        ));
    }

    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let updated = User::update_profile(
        &state.db,
        user_id,
        payload.username.as_deref(),
        payload.email.as_deref(),
        password_hash.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("User not found"))?;

    info!(user_id, "user profile updated");
    Ok(Json(UpdateProfileResponse {
        message: "User profile updated successfully",
        user_profile: updated.into(),
    }))
}
