use serde::Serialize;
use sqlx::FromRow;

/// Film record in the catalog. Rows enter the store out of band (submission
/// approval is handled off-system), so there is no insert path here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Film {
    pub film_id: i64,
    pub title: String,
    pub release_year: i32,
    pub description: Option<String>,
}
