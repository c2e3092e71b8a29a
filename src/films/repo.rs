use sqlx::PgPool;

use crate::films::repo_types::Film;

impl Film {
    /// Find a film by title and release year.
    pub async fn find_by_title_and_year(
        db: &PgPool,
        title: &str,
        release_year: i32,
    ) -> anyhow::Result<Option<Film>> {
        let film = sqlx::query_as::<_, Film>(
            r#"
            SELECT film_id, title, release_year, description
            FROM films
            WHERE title = $1 AND release_year = $2
            "#,
        )
        .bind(title)
        .bind(release_year)
        .fetch_optional(db)
        .await?;
        Ok(film)
    }

    /// Retrieve the whole catalog.
    pub async fn get_all(db: &PgPool) -> anyhow::Result<Vec<Film>> {
        let films = sqlx::query_as::<_, Film>(
            r#"
            SELECT film_id, title, release_year, description
            FROM films
            ORDER BY film_id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(films)
    }
}
