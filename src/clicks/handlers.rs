use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    clicks::repo::{self, WatchLinkClick},
    error::ApiError,
    state::AppState,
};

/// Placeholder id handed to logged-out visitors; their clicks are stored
/// with a null user.
const TEMP_USER_ID: i64 = 0;

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub user_id: Option<i64>,
    pub film_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AuthClickRequest {
    pub film_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: WatchLinkClick,
}

#[derive(Debug, Serialize)]
pub struct TempIdResponse {
    #[serde(rename = "temporaryUserId")]
    pub temporary_user_id: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generatetempid", get(generate_temp_id))
        .route("/click", post(click))
        .route("/authclick", post(auth_click))
}

#[instrument]
pub async fn generate_temp_id() -> Json<TempIdResponse> {
    Json(TempIdResponse {
        temporary_user_id: TEMP_USER_ID,
    })
}

#[instrument(skip(state))]
pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, ApiError> {
    let data = repo::record(&state.db, payload.user_id, payload.film_id).await?;

    info!(film_id = payload.film_id, "watch link click recorded");
    Ok(Json(ClickResponse {
        success: true,
        message: "Click recorded successfully",
        data,
    }))
}

#[instrument(skip(state, user))]
pub async fn auth_click(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AuthClickRequest>,
) -> Result<Json<ClickResponse>, ApiError> {
    let data = repo::record(&state.db, Some(user.user_id), payload.film_id).await?;

    info!(
        user_id = user.user_id,
        film_id = payload.film_id,
        "watch link click recorded"
    );
    Ok(Json(ClickResponse {
        success: true,
        message: "Click recorded successfully",
        data,
    }))
}
