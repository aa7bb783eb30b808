use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        medicines::MedicineList,
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Medicine},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/{id}/medicines", get(list_category_medicines))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Category page", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let (page, per_page) = pagination.normalize();
    let result = state.categories.list(page as u64, per_page as u64).await?;

    let meta = Meta::new(page, per_page, result.meta.total as i64);
    let items = result.data.into_iter().map(Category::from).collect();
    Ok(Json(ApiResponse::success(
        "OK",
        CategoryList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category detail", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.categories.find_by_id(id).await?;
    Ok(Json(ApiResponse::success("OK", category.into(), None)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}/medicines",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Medicines in this category", body = ApiResponse<MedicineList>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn list_category_medicines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MedicineList>>> {
    let items = state
        .medicines
        .find_by_category(id)
        .await?
        .into_iter()
        .map(Medicine::from)
        .collect();
    Ok(Json(ApiResponse::success("OK", MedicineList { items }, None)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<Category>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    ensure_admin(&user)?;
    let category = state.categories.create(payload).await?;
    Ok(Json(ApiResponse::success("Created", category.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    ensure_admin(&user)?;
    let category = state.categories.update(id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", category.into(), None)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Category not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    state.categories.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        None,
    )))
}
