use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::films::Film;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rating {
    pub user_id: i64,
    pub film_id: i64,
    pub rating: i32,
}

/// One rating per (user, film); a repeat insert is a store-level conflict.
pub async fn create(
    db: &PgPool,
    user_id: i64,
    film_id: i64,
    rating: i32,
) -> anyhow::Result<Rating> {
    let row = sqlx::query_as::<_, Rating>(
        r#"
        INSERT INTO ratings (user_id, film_id, rating)
        VALUES ($1, $2, $3)
        RETURNING user_id, film_id, rating
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .bind(rating)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Upsert used by the edit path.
pub async fn upsert(db: &PgPool, user_id: i64, film_id: i64, rating: i32) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ratings (user_id, film_id, rating)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, film_id)
        DO UPDATE SET rating = EXCLUDED.rating
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .bind(rating)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_by_user_and_film(
    db: &PgPool,
    user_id: i64,
    film_id: i64,
) -> anyhow::Result<Option<Rating>> {
    let row = sqlx::query_as::<_, Rating>(
        r#"
        SELECT user_id, film_id, rating
        FROM ratings
        WHERE user_id = $1 AND film_id = $2
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Films the user has not rated yet.
pub async fn not_rated_films(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Film>> {
    let films = sqlx::query_as::<_, Film>(
        r#"
        SELECT films.film_id, films.title, films.release_year, films.description
        FROM films
        LEFT JOIN ratings ON films.film_id = ratings.film_id AND ratings.user_id = $1
        WHERE ratings.rating IS NULL
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(films)
}

pub async fn rating_count(db: &PgPool, film_id: i64) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM ratings
        WHERE film_id = $1
        "#,
    )
    .bind(film_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

pub async fn sum_total(db: &PgPool, film_id: i64) -> anyhow::Result<i64> {
    let (sum,): (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(rating), 0)
        FROM ratings
        WHERE film_id = $1
        "#,
    )
    .bind(film_id)
    .fetch_one(db)
    .await?;
    Ok(sum)
}
