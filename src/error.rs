use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Outward error taxonomy. Every handler converts its store/crypto failures
/// into one of these; internal detail is logged here and never forwarded.
///
/// The credential errors are deliberately asymmetric: bad username and bad
/// password collapse into the same `AuthenticationFailed` wording, while an
/// unverified account gets its own message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("User not verified. Please check your email for verification instructions.")]
    NotVerified,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed
            | ApiError::NotVerified
            | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that crosses the wire. Internal failures get a generic
    /// body; the real chain only goes to the log.
    fn outward_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = ?e, "internal error");
        }
        let body = Json(json!({ "error": self.outward_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Conflict("dup").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::AuthenticationFailed.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotVerified.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Unauthorized("no").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden("own").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("gone").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn authentication_failures_share_one_wording() {
        // Unknown user and wrong password both map to this variant, so the
        // payloads are byte-identical by construction.
        assert_eq!(ApiError::AuthenticationFailed.to_string(), "Authentication failed");
    }

    #[test]
    fn not_verified_is_the_distinct_message() {
        let msg = ApiError::NotVerified.to_string();
        assert!(msg.contains("not verified"));
        assert_ne!(msg, ApiError::AuthenticationFailed.to_string());
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = ApiError::Internal(anyhow::anyhow!("pg: secret detail"));
        let message = err.outward_message();
        assert_eq!(message, "Internal Server Error");
        assert!(!message.contains("secret detail"));
    }

    #[test]
    fn client_facing_variants_keep_their_wording() {
        assert_eq!(ApiError::Conflict("Username already exists").outward_message(), "Username already exists");
        assert_eq!(ApiError::Unauthorized("Invalid refresh token").outward_message(), "Invalid refresh token");
    }
}
