// src/domain/review.rs

use crate::errors::ServerError;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub hostel_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: i64,
}

/// A review as submitted by a student, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    pub fn parse(rating: &str, comment: &str) -> Result<Self, ServerError> {
        let rating: u8 = rating
            .trim()
            .parse()
            .map_err(|_| ServerError::BadRequest("rating must be a whole number".into()))?;
        if !(MIN_STARS..=MAX_STARS).contains(&rating) {
            return Err(ServerError::BadRequest(format!(
                "rating must be between {MIN_STARS} and {MAX_STARS}"
            )));
        }

        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ServerError::BadRequest("comment is required".into()));
        }

        Ok(Self {
            rating,
            comment: comment.to_string(),
        })
    }
}

pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}
