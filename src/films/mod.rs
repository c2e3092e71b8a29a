mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;

pub use repo_types::Film;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::router()
}
