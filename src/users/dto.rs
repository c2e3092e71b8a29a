use serde::{Deserialize, Serialize};

use crate::auth::PublicUser;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub username: String,
    pub email: String,
}

/// Booleans only: returning the matched rows here would leak other users'
/// data to an unauthenticated caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub username_exists: bool,
    pub email_exists: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: &'static str,
    #[serde(rename = "userProfile")]
    pub user_profile: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_response_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&CheckResponse {
            username_exists: true,
            email_exists: false,
        })
        .unwrap();
        assert_eq!(json, "{\"usernameExists\":true,\"emailExists\":false}");
    }
}
