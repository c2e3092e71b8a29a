use serde::{Deserialize, Serialize};

use crate::films::Film;
use crate::ratings::repo::Rating;

#[derive(Debug, Deserialize)]
pub struct CheckRatingQuery {
    pub user_id: i64,
    pub film_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct FilmIdQuery {
    pub film_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub film_id: i64,
    pub rating: i32,
}

#[derive(Debug, Serialize)]
pub struct CheckRatingResponse {
    pub rated: bool,
    #[serde(rename = "userRating", skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RatedResponse {
    pub message: &'static str,
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FilmsResponse {
    pub films: Vec<Film>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SumTotalResponse {
    pub sum_total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rating_uses_camel_case_and_is_omitted_when_absent() {
        let rated = serde_json::to_string(&CheckRatingResponse {
            rated: true,
            user_rating: Some(8),
        })
        .unwrap();
        assert!(rated.contains("\"userRating\":8"));

        let unrated = serde_json::to_string(&CheckRatingResponse {
            rated: false,
            user_rating: None,
        })
        .unwrap();
        assert!(!unrated.contains("userRating"));
    }
}
