use serde::{Deserialize, Serialize};

use crate::films::Film;
use crate::mentions::repo::Mention;

#[derive(Debug, Deserialize)]
pub struct CheckMentionQuery {
    pub user_id: i64,
    pub film_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct FilmIdQuery {
    pub film_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct MentionRequest {
    pub film_id: i64,
    pub mentioned: bool,
}

/// `hasMentioned` is null when the user has no mention row for the film,
/// otherwise the stored flag.
#[derive(Debug, Serialize)]
pub struct CheckMentionResponse {
    #[serde(rename = "hasMentioned")]
    pub has_mentioned: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MentionResponse {
    pub message: &'static str,
    pub mention: Mention,
}

#[derive(Debug, Serialize)]
pub struct FilmsResponse {
    pub films: Vec<Film>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_mentioned_serializes_null_when_no_row_exists() {
        let json = serde_json::to_string(&CheckMentionResponse {
            has_mentioned: None,
        })
        .unwrap();
        assert_eq!(json, "{\"hasMentioned\":null}");
    }
}
