use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    mentions::dto::{
        CheckMentionQuery, CheckMentionResponse, CountResponse, FilmIdQuery, FilmsResponse,
        MentionRequest, MentionResponse,
    },
    mentions::repo,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkmentioned", get(check_mentioned))
        .route("/mentioned", post(add_mention))
        .route("/not-mentioned", get(not_mentioned))
        .route("/not-heard-before", get(not_heard_before))
        .route("/not-heard-before-count", get(not_heard_before_count))
        .route("/heard-not-rated-count", get(heard_not_rated_count))
}

#[instrument(skip(state))]
pub async fn check_mentioned(
    State(state): State<AppState>,
    Query(params): Query<CheckMentionQuery>,
) -> Result<Json<CheckMentionResponse>, ApiError> {
    let has_mentioned = repo::check(&state.db, params.user_id, params.film_id).await?;
    Ok(Json(CheckMentionResponse { has_mentioned }))
}

#[instrument(skip(state, user))]
pub async fn add_mention(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<MentionRequest>,
) -> Result<(StatusCode, Json<MentionResponse>), ApiError> {
    let mention = repo::upsert(&state.db, user.user_id, payload.film_id, payload.mentioned).await?;

    info!(
        user_id = user.user_id,
        film_id = payload.film_id,
        mentioned = payload.mentioned,
        "mention recorded"
    );
    Ok((
        StatusCode::CREATED,
        Json(MentionResponse {
            message: "Mention added/updated successfully",
            mention,
        }),
    ))
}

#[instrument(skip(state, user))]
pub async fn not_mentioned(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<FilmsResponse>, ApiError> {
    let films = repo::not_mentioned_films(&state.db, user.user_id).await?;
    Ok(Json(FilmsResponse { films }))
}

#[instrument(skip(state, user))]
pub async fn not_heard_before(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<FilmsResponse>, ApiError> {
    let films = repo::not_heard_before_films(&state.db, user.user_id).await?;
    Ok(Json(FilmsResponse { films }))
}

#[instrument(skip(state))]
pub async fn not_heard_before_count(
    State(state): State<AppState>,
    Query(params): Query<FilmIdQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = repo::not_heard_before_count(&state.db, params.film_id).await?;
    Ok(Json(CountResponse { count }))
}

#[instrument(skip(state))]
pub async fn heard_not_rated_count(
    State(state): State<AppState>,
    Query(params): Query<FilmIdQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = repo::heard_not_rated_count(&state.db, params.film_id).await?;
    Ok(Json(CountResponse { count }))
}
