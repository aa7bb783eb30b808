use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Review;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub pharmacy_id: Uuid,
    /// Must be within 1..=5.
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<Review>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingStats {
    /// Mean rating rounded to one decimal; 0.0 when the pharmacy has no reviews.
    pub average_rating: f64,
    pub total_reviews: u64,
}
