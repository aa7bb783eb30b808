use sea_orm::ActiveValue::NotSet;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Order as SortOrder, Set};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, RatingStats, UpdateReviewRequest},
    entity::reviews::{ActiveModel as ReviewActive, Column, Entity as Reviews, Model},
    error::{AppError, AppResult},
    repository::Repository,
    services::pharmacy_service::PharmacyService,
};

const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

#[derive(Clone)]
pub struct ReviewService {
    reviews: Repository<Reviews>,
    pharmacies: PharmacyService,
}

impl ReviewService {
    pub fn new(conn: DatabaseConnection, pharmacies: PharmacyService) -> Self {
        Self {
            reviews: Repository::new(conn),
            pharmacies,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Model> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Review"))
    }

    pub async fn find_by_pharmacy(&self, pharmacy_id: Uuid) -> AppResult<Vec<Model>> {
        self.pharmacies.find_by_id(pharmacy_id).await?;
        Ok(self
            .reviews
            .find_many_ordered(
                Column::PharmacyId.eq(pharmacy_id),
                Column::CreatedAt,
                SortOrder::Desc,
            )
            .await?)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Model>> {
        Ok(self
            .reviews
            .find_many_ordered(
                Column::UserId.eq(user_id),
                Column::CreatedAt,
                SortOrder::Desc,
            )
            .await?)
    }

    /// One review per (user, pharmacy); the rating must be within 1..=5.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        payload: CreateReviewRequest,
    ) -> AppResult<Model> {
        if !RATING_RANGE.contains(&payload.rating) {
            return Err(AppError::InvalidInput(
                "rating must be between 1 and 5".into(),
            ));
        }

        self.pharmacies.find_by_id(payload.pharmacy_id).await?;

        let existing = self
            .reviews
            .count(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::PharmacyId.eq(payload.pharmacy_id)),
            )
            .await?;
        if existing > 0 {
            return Err(AppError::Conflict(
                "you have already reviewed this pharmacy".into(),
            ));
        }

        let active = ReviewActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            pharmacy_id: Set(payload.pharmacy_id),
            rating: Set(payload.rating),
            comment: Set(payload.comment),
            created_at: NotSet,
            updated_at: NotSet,
        };
        Ok(self.reviews.create(active).await?)
    }

    /// Mean rating rounded to one decimal; an unreviewed pharmacy reports 0.
    pub async fn get_pharmacy_rating_stats(&self, pharmacy_id: Uuid) -> AppResult<RatingStats> {
        self.pharmacies.find_by_id(pharmacy_id).await?;

        let ratings = self
            .reviews
            .find_many(Column::PharmacyId.eq(pharmacy_id))
            .await?;

        let total_reviews = ratings.len() as u64;
        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
            let mean = sum as f64 / total_reviews as f64;
            (mean * 10.0).round() / 10.0
        };

        Ok(RatingStats {
            average_rating,
            total_reviews,
        })
    }

    pub async fn update_review(
        &self,
        id: Uuid,
        user_id: Uuid,
        payload: UpdateReviewRequest,
    ) -> AppResult<Model> {
        let review = self.find_by_id(id).await?;
        if review.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        if let Some(rating) = payload.rating {
            if !RATING_RANGE.contains(&rating) {
                return Err(AppError::InvalidInput(
                    "rating must be between 1 and 5".into(),
                ));
            }
        }

        let mut patch = ReviewActive {
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(rating) = payload.rating {
            patch.rating = Set(rating);
        }
        if let Some(comment) = payload.comment {
            patch.comment = Set(Some(comment));
        }

        let updated = self.reviews.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Review"))
    }

    pub async fn delete_review(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let review = self.find_by_id(id).await?;
        if review.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        self.reviews.delete_by_id(id).await?;
        Ok(())
    }
}
