//! Verification flow: opaque email tokens and their consumption.
//!
//! Verification tokens are random byte strings rendered as hex, independent
//! of the JWT issuer. Per user the flow is Pending -> Verified, or
//! Pending -> Reaped if the retention window elapses first.

use lazy_static::lazy_static;
use rand::{rngs::OsRng, RngCore};
use regex::Regex;
use tracing::{info, warn};

use crate::auth::repo_types::User;
use crate::state::AppState;

const VERIFICATION_TOKEN_BYTES: usize = 20;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn generate_verification_token() -> String {
    let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid verification token")]
    InvalidToken,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Issue a verification token for a freshly created user and email it as a
/// clickable link. Delivery failure is logged and swallowed: registration
/// already succeeded and the token stays in the store, so the user can be
/// re-sent the link without rolling anything back.
pub async fn start_verification(state: &AppState, user: &User) -> anyhow::Result<()> {
    let token = generate_verification_token();
    User::set_verification_token(&state.db, user.user_id, &token).await?;

    let link = format!("{}/verification/{}", state.config.app_url, token);
    let body = format!(
        "<p>Almost there!</p>\n\
         <p>Click <a href=\"{link}\">here</a> to verify your email.</p>"
    );
    if let Err(e) = state
        .mailer
        .send(&user.email, "Email Verification", &body)
        .await
    {
        warn!(error = %e, user_id = user.user_id, "failed to send verification email");
    }
    Ok(())
}

/// Consume a verification token. An unknown token and an already-consumed
/// (now-null) token fail identically; success flips `verified` and clears
/// the token in a single store operation.
pub async fn confirm(state: &AppState, token: &str) -> Result<(), VerificationError> {
    let user = User::find_by_verification_token(&state.db, token)
        .await?
        .ok_or(VerificationError::InvalidToken)?;

    User::mark_verified(&state.db, user.user_id).await?;
    info!(user_id = user.user_id, "email verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_token_is_forty_hex_chars() {
        let token = generate_verification_token();
        assert_eq!(token.len(), VERIFICATION_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verification_tokens_are_unique_per_call() {
        assert_ne!(generate_verification_token(), generate_verification_token());
    }

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_junk() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spa ce@x.com"));
    }
}
