use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::films::Film;

/// A mention records whether the user recognized a film: `mentioned = false`
/// means they had not heard of it before visiting.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Mention {
    pub user_id: i64,
    pub film_id: i64,
    pub mentioned: bool,
}

pub async fn upsert(
    db: &PgPool,
    user_id: i64,
    film_id: i64,
    mentioned: bool,
) -> anyhow::Result<Mention> {
    let row = sqlx::query_as::<_, Mention>(
        r#"
        INSERT INTO mentions (user_id, film_id, mentioned)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, film_id)
        DO UPDATE SET mentioned = EXCLUDED.mentioned
        RETURNING user_id, film_id, mentioned
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .bind(mentioned)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// None when the user has no mention row for the film.
pub async fn check(db: &PgPool, user_id: i64, film_id: i64) -> anyhow::Result<Option<bool>> {
    let row: Option<(bool,)> = sqlx::query_as(
        r#"
        SELECT mentioned
        FROM mentions
        WHERE user_id = $1 AND film_id = $2
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(mentioned,)| mentioned))
}

/// Films the user has no mention row for.
pub async fn not_mentioned_films(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Film>> {
    let films = sqlx::query_as::<_, Film>(
        r#"
        SELECT films.film_id, films.title, films.release_year, films.description
        FROM films
        LEFT JOIN mentions ON films.film_id = mentions.film_id AND mentions.user_id = $1
        WHERE mentions.mentioned IS NULL
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(films)
}

/// Films the user marked as not heard of before.
pub async fn not_heard_before_films(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Film>> {
    let films = sqlx::query_as::<_, Film>(
        r#"
        SELECT films.film_id, films.title, films.release_year, films.description
        FROM films
        LEFT JOIN mentions ON films.film_id = mentions.film_id AND mentions.user_id = $1
        WHERE mentions.mentioned IS FALSE
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(films)
}

/// Distinct users who had not heard of the film before visiting.
pub async fn not_heard_before_count(db: &PgPool, film_id: i64) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(DISTINCT user_id)
        FROM mentions
        WHERE film_id = $1 AND mentioned = FALSE
        "#,
    )
    .bind(film_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

/// Distinct users who mentioned the film but never rated it.
pub async fn heard_not_rated_count(db: &PgPool, film_id: i64) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(DISTINCT m.user_id)
        FROM mentions m
        LEFT JOIN ratings r ON m.user_id = r.user_id AND m.film_id = r.film_id
        WHERE m.film_id = $1 AND r.rating IS NULL
        "#,
    )
    .bind(film_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}
