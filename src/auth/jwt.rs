use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::state::AppState;

pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,   // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}

/// Signing and verification keys for both token families. Access and refresh
/// tokens use independent secrets, so one kind never validates as the other.
#[derive(Clone)]
pub struct JwtKeys {
    pub access_encoding: EncodingKey,
    pub access_decoding: DecodingKey,
    pub refresh_encoding: EncodingKey,
    pub refresh_decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let auth = &state.config.auth;
        Self {
            access_encoding: EncodingKey::from_secret(auth.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(auth.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(auth.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(auth.refresh_secret.as_bytes()),
        }
    }
}

impl JwtKeys {
    fn sign(key: &EncodingKey, user_id: i64, ttl: Duration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, key)?;
        Ok(token)
    }

    fn verify(key: &DecodingKey, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, key, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn sign_access(&self, user_id: i64) -> anyhow::Result<String> {
        let token = Self::sign(&self.access_encoding, user_id, ACCESS_TOKEN_TTL)?;
        debug!(user_id, "access token signed");
        Ok(token)
    }

    pub fn sign_refresh(&self, user_id: i64) -> anyhow::Result<String> {
        let token = Self::sign(&self.refresh_encoding, user_id, REFRESH_TOKEN_TTL)?;
        debug!(user_id, "refresh token signed");
        Ok(token)
    }

    pub fn verify_access(&self, token: &str) -> anyhow::Result<Claims> {
        Self::verify(&self.access_decoding, token)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        Self::verify(&self.refresh_decoding, token)
    }
}

/// Absolute expiry instant of a freshly issued access token, in epoch ms.
/// Returned alongside the token so clients can schedule refreshes.
pub fn access_token_expiration_ms() -> i64 {
    let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(ACCESS_TOKEN_TTL.as_secs() as i64);
    (exp.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_access_token() {
        let keys = make_keys();
        let token = keys.sign_access(42).expect("sign access");
        let claims = keys.verify_access(&token).expect("verify token");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn sign_and_verify_refresh_token() {
        let keys = make_keys();
        let token = keys.sign_refresh(7).expect("sign refresh");
        let claims = keys.verify_refresh(&token).expect("verify refresh");
        assert_eq!(claims.sub, 7);
    }

    #[tokio::test]
    async fn refresh_token_never_validates_as_access() {
        let keys = make_keys();
        let refresh = keys.sign_refresh(1).expect("sign refresh");
        assert!(keys.verify_access(&refresh).is_err());
    }

    #[tokio::test]
    async fn access_token_never_validates_as_refresh() {
        let keys = make_keys();
        let access = keys.sign_access(1).expect("sign access");
        assert!(keys.verify_refresh(&access).is_err());
    }

    #[tokio::test]
    async fn expired_token_is_rejected_despite_valid_signature() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: 1,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token =
            encode(&Header::default(), &claims, &keys.access_encoding).expect("encode expired");
        assert!(keys.verify_access(&token).is_err());
    }

    #[tokio::test]
    async fn foreign_signature_is_rejected() {
        let keys = make_keys();
        let foreign = EncodingKey::from_secret(b"some-other-secret");
        let claims = Claims {
            sub: 1,
            iat: OffsetDateTime::now_utc().unix_timestamp() as usize,
            exp: (OffsetDateTime::now_utc().unix_timestamp() + 3600) as usize,
        };
        let token = encode(&Header::default(), &claims, &foreign).expect("encode foreign");
        assert!(keys.verify_access(&token).is_err());
    }

    #[test]
    fn expiration_ms_is_about_an_hour_out() {
        let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        let exp = access_token_expiration_ms();
        let delta = exp - now_ms;
        assert!(delta > 3_590_000 && delta <= 3_610_000, "delta was {delta}");
    }
}
