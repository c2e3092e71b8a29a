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
    ratings::dto::{
        CheckRatingQuery, CheckRatingResponse, CountResponse, FilmIdQuery, FilmsResponse,
        MessageResponse, RateRequest, RatedResponse, SumTotalResponse,
    },
    ratings::repo,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkrating", get(check_rating))
        .route("/rate", post(rate))
        .route("/edit", post(edit))
        .route("/not-rated", get(not_rated))
        .route("/rating-count", get(rating_count))
        .route("/sum-total", get(sum_total))
}

#[instrument(skip(state))]
pub async fn check_rating(
    State(state): State<AppState>,
    Query(params): Query<CheckRatingQuery>,
) -> Result<Json<CheckRatingResponse>, ApiError> {
    let existing = repo::find_by_user_and_film(&state.db, params.user_id, params.film_id).await?;
    Ok(Json(match existing {
        Some(r) => CheckRatingResponse {
            rated: true,
            user_rating: Some(r.rating),
        },
        None => CheckRatingResponse {
            rated: false,
            user_rating: None,
        },
    }))
}

#[instrument(skip(state, user))]
pub async fn rate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RateRequest>,
) -> Result<(StatusCode, Json<RatedResponse>), ApiError> {
    let rating = repo::create(&state.db, user.user_id, payload.film_id, payload.rating).await?;

    info!(user_id = user.user_id, film_id = payload.film_id, "film rated");
    Ok((
        StatusCode::CREATED,
        Json(RatedResponse {
            message: "Film rated successfully",
            rating,
        }),
    ))
}

#[instrument(skip(state, user))]
pub async fn edit(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    repo::upsert(&state.db, user.user_id, payload.film_id, payload.rating).await?;

    info!(user_id = user.user_id, film_id = payload.film_id, "rating updated");
    Ok(Json(MessageResponse {
        message: "Rating updated successfully",
    }))
}

#[instrument(skip(state, user))]
pub async fn not_rated(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<FilmsResponse>, ApiError> {
    let films = repo::not_rated_films(&state.db, user.user_id).await?;
    Ok(Json(FilmsResponse { films }))
}

#[instrument(skip(state))]
pub async fn rating_count(
    State(state): State<AppState>,
    Query(params): Query<FilmIdQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = repo::rating_count(&state.db, params.film_id).await?;
    Ok(Json(CountResponse { count }))
}

#[instrument(skip(state))]
pub async fn sum_total(
    State(state): State<AppState>,
    Query(params): Query<FilmIdQuery>,
) -> Result<Json<SumTotalResponse>, ApiError> {
    let sum_total = repo::sum_total(&state.db, params.film_id).await?;
    Ok(Json(SumTotalResponse { sum_total }))
}
