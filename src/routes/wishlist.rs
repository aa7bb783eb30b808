use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::wishlist::{AddToWishlistRequest, WishlistMedicines},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Medicine, WishlistEntry},
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist))
        .route("/{medicine_id}", axum::routing::delete(remove_from_wishlist))
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Saved medicines for the current user", body = ApiResponse<WishlistMedicines>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WishlistMedicines>>> {
    let items = state
        .wishlist
        .get_wishlist(user.user_id)
        .await?
        .into_iter()
        .map(Medicine::from)
        .collect();
    Ok(Json(ApiResponse::success(
        "OK",
        WishlistMedicines { items },
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = AddToWishlistRequest,
    responses(
        (status = 200, description = "Medicine saved; repeat saves are no-ops", body = ApiResponse<WishlistEntry>),
        (status = 404, description = "Medicine not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToWishlistRequest>,
) -> AppResult<Json<ApiResponse<WishlistEntry>>> {
    let entry = state
        .wishlist
        .add_to_wishlist(user.user_id, payload.medicine_id)
        .await?;
    Ok(Json(ApiResponse::success("Saved", entry.into(), None)))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{medicine_id}",
    params(("medicine_id" = Uuid, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Entry removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Wishlist item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(medicine_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .wishlist
        .remove_from_wishlist(user.user_id, medicine_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Removed",
        serde_json::json!({}),
        None,
    )))
}
