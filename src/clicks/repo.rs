use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Watch-link click event. `user_id` is null for anonymous visitors.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WatchLinkClick {
    pub click_id: i64,
    pub user_id: Option<i64>,
    pub film_id: i64,
    pub click: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn record(
    db: &PgPool,
    user_id: Option<i64>,
    film_id: i64,
) -> anyhow::Result<WatchLinkClick> {
    let row = sqlx::query_as::<_, WatchLinkClick>(
        r#"
        INSERT INTO watch_link_clicks (user_id, film_id, click)
        VALUES ($1, $2, TRUE)
        RETURNING click_id, user_id, film_id, click, created_at
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .fetch_one(db)
    .await?;
    Ok(row)
}
