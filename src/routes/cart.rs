use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, put},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::cart::{AddToCartRequest, CartWithItems, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::CartItem,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route(
            "/items/{medicine_id}",
            put(update_cart_item).delete(remove_from_cart),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current user's cart with line items and total", body = ApiResponse<CartWithItems>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartWithItems>>> {
    let cart = state.carts.get_cart_with_items(user.user_id).await?;
    Ok(Json(ApiResponse::success("OK", cart, None)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Line item added or quantity incremented", body = ApiResponse<CartItem>),
        (status = 404, description = "Medicine not found"),
        (status = 400, description = "Invalid quantity"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let item = state
        .carts
        .add_item_to_cart(user.user_id, payload.medicine_id, payload.quantity)
        .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::CartAdd,
        Some(serde_json::json!({ "medicine_id": payload.medicine_id, "quantity": item.quantity })),
    )
    .await;
    Ok(Json(ApiResponse::success("OK", item.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{medicine_id}",
    params(("medicine_id" = Uuid, Path, description = "Medicine ID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity set; 0 removes the line", body = ApiResponse<Option<CartItem>>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(medicine_id): Path<Uuid>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<Option<CartItem>>>> {
    let item = state
        .carts
        .update_cart_item(user.user_id, medicine_id, payload.quantity)
        .await?;
    Ok(Json(ApiResponse::success(
        "OK",
        item.map(CartItem::from),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{medicine_id}",
    params(("medicine_id" = Uuid, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Line item removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Cart not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(medicine_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .carts
        .remove_item_from_cart(user.user_id, medicine_id)
        .await?;
    Ok(Json(ApiResponse::success(
        "Removed",
        serde_json::json!({}),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "All line items removed", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.carts.clear_cart(user.user_id).await?;
    Ok(Json(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        None,
    )))
}
