use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::reviews::{CreateReviewRequest, RatingStats, ReviewList, UpdateReviewRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Review,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/mine", get(list_my_reviews))
        .route("/{id}", axum::routing::put(update_review).delete(delete_review))
        .route("/pharmacy/{pharmacy_id}", get(list_pharmacy_reviews))
        .route("/pharmacy/{pharmacy_id}/stats", get(pharmacy_rating_stats))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ApiResponse<Review>),
        (status = 409, description = "User already reviewed this pharmacy"),
        (status = 400, description = "Rating out of range"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let pharmacy_id = payload.pharmacy_id;
    let review = state.reviews.create_review(user.user_id, payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::ReviewCreate,
        Some(serde_json::json!({ "pharmacy_id": pharmacy_id, "rating": review.rating })),
    )
    .await;
    Ok(Json(ApiResponse::success("Created", review.into(), None)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/mine",
    responses(
        (status = 200, description = "Current user's reviews", body = ApiResponse<ReviewList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn list_my_reviews(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let items = state
        .reviews
        .find_by_user(user.user_id)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(Json(ApiResponse::success("OK", ReviewList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/pharmacy/{pharmacy_id}",
    params(("pharmacy_id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Reviews for a pharmacy, newest first", body = ApiResponse<ReviewList>),
        (status = 404, description = "Pharmacy not found"),
    ),
    tag = "Reviews"
)]
pub async fn list_pharmacy_reviews(
    State(state): State<AppState>,
    Path(pharmacy_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let items = state
        .reviews
        .find_by_pharmacy(pharmacy_id)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(Json(ApiResponse::success("OK", ReviewList { items }, None)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/pharmacy/{pharmacy_id}/stats",
    params(("pharmacy_id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Mean rating and review count", body = ApiResponse<RatingStats>),
        (status = 404, description = "Pharmacy not found"),
    ),
    tag = "Reviews"
)]
pub async fn pharmacy_rating_stats(
    State(state): State<AppState>,
    Path(pharmacy_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RatingStats>>> {
    let stats = state.reviews.get_pharmacy_rating_stats(pharmacy_id).await?;
    Ok(Json(ApiResponse::success("OK", stats, None)))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let review = state
        .reviews
        .update_review(id, user.user_id, payload)
        .await?;
    Ok(Json(ApiResponse::success("Updated", review.into(), None)))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.reviews.delete_review(id, user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        None,
    )))
}
