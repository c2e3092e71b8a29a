use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response returned after a successful login. Expiration is the absolute
/// instant in epoch ms.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expiration: i64,
}

/// Response returned after a successful token rotation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub message: &'static str,
    pub new_access_token: String,
    pub new_refresh_token: String,
    pub new_access_token_expiration: i64,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub authorized: bool,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub success: bool,
}

/// Public part of the user returned to the client. No hash, no tokens.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: 1,
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$opaque".into(),
            verified: true,
            verification_token: None,
            refresh_token: Some("stored-refresh".into()),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn login_response_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&LoginResponse {
            message: "Authentication successful",
            access_token: "a".into(),
            refresh_token: "r".into(),
            access_token_expiration: 1_700_000_000_000,
        })
        .unwrap();
        assert!(json.contains("\"accessToken\""));
        assert!(json.contains("\"refreshToken\""));
        assert!(json.contains("\"accessTokenExpiration\""));
    }

    #[test]
    fn refresh_response_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&RefreshResponse {
            message: "Authentication successful",
            new_access_token: "a".into(),
            new_refresh_token: "r".into(),
            new_access_token_expiration: 1_700_000_000_000,
            user: sample_user().into(),
        })
        .unwrap();
        assert!(json.contains("\"newAccessToken\""));
        assert!(json.contains("\"newRefreshToken\""));
        assert!(json.contains("\"newAccessTokenExpiration\""));
    }

    #[test]
    fn public_user_never_carries_hash_or_tokens() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(!json.contains("stored-refresh"));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
