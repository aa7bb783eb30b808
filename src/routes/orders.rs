use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(checkout))
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Current user's orders, newest first", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let items = state.orders.get_user_orders(user.user_id).await?;
    Ok(Json(ApiResponse::success("OK", OrderList { items }, None)))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed from the current cart", body = ApiResponse<Order>),
        (status = 422, description = "Cart is empty"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .orders
        .create_order_from_cart(user.user_id, payload)
        .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::Checkout,
        Some(serde_json::json!({ "order_id": order.id, "total_amount": order.total_amount })),
    )
    .await;
    Ok(Json(ApiResponse::success("Order placed", order.into(), None)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its line items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let order = state.orders.get_order_with_items(id).await?;
    if order.order.user_id != user.user_id && user.role != "admin" {
        return Err(AppError::Forbidden);
    }
    Ok(Json(ApiResponse::success("OK", order, None)))
}
