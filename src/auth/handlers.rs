use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, RefreshRequest, RefreshResponse,
            RegisterRequest, StoreResponse, VerificationResponse, VerifyResponse,
        },
        extractors::AuthUser,
        jwt::{access_token_expiration_ms, JwtKeys},
        password::{hash_password, verify_password},
        repo_types::User,
        services::{self, is_valid_email, VerificationError},
    },
    error::ApiError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/store", post(store))
        .route("/verify", get(verify))
        .route("/verification/:token", get(confirm_verification))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.is_empty() {
        return Err(ApiError::Validation("Username is required"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short"));
    }

    // Uniqueness is checked before hashing to avoid the wasted work.
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already exists");
        return Err(ApiError::Conflict("Username already exists"));
    }
    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    services::start_verification(&state, &user).await?;

    info!(user_id = user.user_id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::AuthenticationFailed);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.user_id, "login invalid password");
        return Err(ApiError::AuthenticationFailed);
    }

    // Unverified state is the one credential failure with a distinct
    // message; it is only reachable with a correct password, so it leaks
    // nothing about account existence.
    if !user.verified {
        warn!(user_id = user.user_id, "login before verification");
        return Err(ApiError::NotVerified);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user.user_id)?;
    let refresh_token = keys.sign_refresh(user.user_id)?;

    info!(user_id = user.user_id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Authentication successful",
        access_token,
        refresh_token,
        access_token_expiration: access_token_expiration_ms(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh).map_err(|e| {
        warn!(error = %e, "refresh token failed verification");
        ApiError::Unauthorized("Invalid refresh token")
    })?;

    // The presented token must also still be the user's current one; a
    // rotated-away token is unusable even before it expires.
    let user = User::find_by_refresh_token(&state.db, &payload.refresh)
        .await?
        .filter(|u| u.user_id == claims.sub)
        .ok_or(ApiError::Unauthorized("Invalid refresh token"))?;

    let new_access_token = keys.sign_access(user.user_id)?;
    let new_refresh_token = keys.sign_refresh(user.user_id)?;

    let rotated =
        User::rotate_refresh_token(&state.db, user.user_id, &payload.refresh, &new_refresh_token)
            .await?;
    if !rotated {
        warn!(user_id = user.user_id, "refresh rotation lost a concurrent swap");
        return Err(ApiError::Unauthorized("Invalid refresh token"));
    }

    info!(user_id = user.user_id, "refresh token rotated");
    Ok(Json(RefreshResponse {
        message: "Authentication successful",
        new_access_token,
        new_refresh_token,
        new_access_token_expiration: access_token_expiration_ms(),
        user: user.into(),
    }))
}

#[instrument(skip(state, user))]
pub async fn store(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<StoreResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let refresh_token = keys.sign_refresh(user.user_id)?;

    User::set_refresh_token(&state.db, user.user_id, &refresh_token).await?;

    info!(user_id = user.user_id, "refresh token stored");
    Ok(Json(StoreResponse { refresh_token }))
}

pub async fn verify(AuthUser(_user): AuthUser) -> Json<VerifyResponse> {
    // The extractor already did all the work.
    Json(VerifyResponse { authorized: true })
}

/// GET /verification/:token answers with its original wire shape
/// ({"success": bool}) rather than the error taxonomy body.
#[instrument(skip(state, token))]
pub async fn confirm_verification(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> (StatusCode, Json<VerificationResponse>) {
    match services::confirm(&state, &token).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(VerificationResponse { success: true }),
        ),
        Err(VerificationError::InvalidToken) => (
            StatusCode::UNAUTHORIZED,
            Json(VerificationResponse { success: false }),
        ),
        Err(VerificationError::Store(e)) => {
            error!(error = ?e, "verification lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(VerificationResponse { success: false }),
            )
        }
    }
}
