use serde::{Deserialize, Serialize};

use crate::films::repo_types::Film;

#[derive(Debug, Deserialize)]
pub struct CheckFilmQuery {
    pub title: String,
    pub release_year: i32,
}

#[derive(Debug, Deserialize)]
pub struct FilmDetailsQuery {
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReviewFilmRequest {
    pub title: String,
    pub release_year: i32,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct FilmsResponse {
    pub films: Vec<Film>,
}

#[derive(Debug, Serialize)]
pub struct FilmResponse {
    pub film: Film,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
