use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod reaper;
pub mod repo;
pub mod repo_types;
pub mod services;
pub(crate) mod extractors;

pub use dto::PublicUser;

pub fn router() -> Router<AppState> {
    handlers::router()
}
