use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::{
        orders::UpdateOrderStatusRequest,
        users::{DashboardStats, UserList},
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, User},
    response::{ApiResponse, Meta},
    routes::params::UserQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/users", get(list_users))
        .route("/orders/{id}/status", put(update_order_status))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Row counts across the main tables", body = ApiResponse<DashboardStats>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    ensure_admin(&user)?;
    let stats = state.admin.dashboard_stats().await?;
    Ok(Json(ApiResponse::success("OK", stats, None)))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Match against name or email")
    ),
    responses(
        (status = 200, description = "User page", body = ApiResponse<UserList>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    ensure_admin(&user)?;
    let (page, per_page) = query.pagination.normalize();
    let result = state
        .admin
        .list_users(page as u64, per_page as u64, query.q)
        .await?;

    let meta = Meta::new(page, per_page, result.count as i64);
    let items = result.data.into_iter().map(User::from).collect();
    Ok(Json(ApiResponse::success(
        "OK",
        UserList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status advanced", body = ApiResponse<Order>),
        (status = 422, description = "Transition not allowed"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    ensure_admin(&user)?;
    let order = state.orders.update_order_status(id, payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::OrderStatusUpdate,
        Some(serde_json::json!({ "order_id": id, "status": order.status })),
    )
    .await;
    Ok(Json(ApiResponse::success("Updated", order.into(), None)))
}
