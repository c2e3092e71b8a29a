use sqlx::PgPool;
use time::OffsetDateTime;

use crate::auth::repo_types::User;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, verified,
                   verification_token, refresh_token, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, verified,
                   verification_token, refresh_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_user_id(db: &PgPool, user_id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, verified,
                   verification_token, refresh_token, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. Starts unverified.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id, username, email, password_hash, verified,
                      verification_token, refresh_token, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Store a pending verification token on the user row.
    pub async fn set_verification_token(
        db: &PgPool,
        user_id: i64,
        token: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $1
            WHERE user_id = $2
            "#,
        )
        .bind(token)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Find a user by a pending verification token. Consumed tokens are null
    /// in the store, so a replayed token matches nothing.
    pub async fn find_by_verification_token(
        db: &PgPool,
        token: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, verified,
                   verification_token, refresh_token, created_at
            FROM users
            WHERE verification_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Flip the user to verified and clear the token in one statement.
    pub async fn mark_verified(db: &PgPool, user_id: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET verified = TRUE,
                verification_token = NULL
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Find a user whose stored refresh token equals the presented one.
    pub async fn find_by_refresh_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, verified,
                   verification_token, refresh_token, created_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Unconditionally replace the stored refresh token (the /store upsert —
    /// the row always exists, so a plain UPDATE covers insert-or-update).
    pub async fn set_refresh_token(db: &PgPool, user_id: i64, token: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $1
            WHERE user_id = $2
            "#,
        )
        .bind(token)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Compare-and-swap rotation: the new token is written only if the stored
    /// value is still the one the caller presented. Returns false when the
    /// swap lost a concurrent rotation.
    pub async fn rotate_refresh_token(
        db: &PgPool,
        user_id: i64,
        current: &str,
        next: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $1
            WHERE user_id = $2 AND refresh_token = $3
            "#,
        )
        .bind(next)
        .bind(user_id)
        .bind(current)
        .execute(db)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Delete unverified users created before the cutoff. Returns the count.
    pub async fn delete_unverified_older_than(
        db: &PgPool,
        cutoff: OffsetDateTime,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE verified = FALSE AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Partial profile update; absent fields keep their current value.
    /// Returns None when no such user exists.
    pub async fn update_profile(
        db: &PgPool,
        user_id: i64,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
            WHERE user_id = $1
            RETURNING user_id, username, email, password_hash, verified,
                      verification_token, refresh_token, created_at
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
