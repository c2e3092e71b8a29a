use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database. Deliberately not `Serialize`: the outward
/// representation is `PublicUser`, which carries none of the token or hash
/// columns.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verified: bool,
    pub verification_token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: OffsetDateTime,
}
