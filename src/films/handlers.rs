use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use anyhow::Context;
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    auth::repo_types::User,
    error::ApiError,
    films::dto::{
        CheckFilmQuery, ExistsResponse, FilmDetailsQuery, FilmResponse, FilmsResponse,
        MessageResponse, ReviewFilmRequest,
    },
    films::repo_types::Film,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkfilm", get(check_film))
        .route("/allfilms", get(all_films))
        .route("/filmdetails", get(film_details))
        .route("/reviewfilm", post(review_film))
}

#[instrument(skip(state))]
pub async fn check_film(
    State(state): State<AppState>,
    Query(params): Query<CheckFilmQuery>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let existing = Film::find_by_title_and_year(&state.db, &params.title, params.release_year)
        .await?;
    Ok(Json(ExistsResponse {
        exists: existing.is_some(),
    }))
}

#[instrument(skip(state))]
pub async fn all_films(State(state): State<AppState>) -> Result<Json<FilmsResponse>, ApiError> {
    let films = Film::get_all(&state.db).await?;
    Ok(Json(FilmsResponse { films }))
}

#[instrument(skip(state))]
pub async fn film_details(
    State(state): State<AppState>,
    Query(params): Query<FilmDetailsQuery>,
) -> Result<Json<FilmResponse>, ApiError> {
    let film = Film::find_by_title_and_year(&state.db, &params.title, params.year)
        .await?
        .ok_or(ApiError::NotFound("Film not found"))?;
    Ok(Json(FilmResponse { film }))
}

/// Submissions are mailed to the catalog address for manual review; nothing
/// is written to the store here.
#[instrument(skip(state, user, payload))]
pub async fn review_film(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ReviewFilmRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    send_review_email(&state, &user, &payload).await?;

    info!(
        user_id = user.user_id,
        title = %payload.title,
        "film submission sent for review"
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Film details sent for review",
        }),
    ))
}

async fn send_review_email(
    state: &AppState,
    user: &User,
    film: &ReviewFilmRequest,
) -> anyhow::Result<()> {
    let to = state
        .config
        .email
        .as_ref()
        .map(|e| e.account.clone())
        .unwrap_or_else(|| "catalog@localhost".into());

    let body = format!(
        "<p>New film submission.</p>\n\
         <p>Submitted by user {} ({})</p>\n\
         <p>Title: {}<br>Release year: {}<br>Description: {}</p>",
        user.user_id,
        user.username,
        film.title,
        film.release_year,
        film.description.as_deref().unwrap_or("(none)"),
    );

    state
        .mailer
        .send(&to, "Film Review Request", &body)
        .await
        .context("send review email")
}
