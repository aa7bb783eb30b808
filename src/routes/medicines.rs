use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::medicines::{CreateMedicineRequest, MedicineList, UpdateMedicineRequest},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::Medicine,
    response::{ApiResponse, Meta},
    routes::params::MedicineQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_medicines).post(create_medicine))
        .route(
            "/{id}",
            get(get_medicine).put(update_medicine).delete(delete_medicine),
        )
        .route("/{id}/image", put(update_medicine_image))
}

#[utoipa::path(
    get,
    path = "/api/medicines",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Match against name or substance"),
        ("category_id" = Option<Uuid>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "Catalog page", body = ApiResponse<MedicineList>)
    ),
    tag = "Medicines"
)]
pub async fn list_medicines(
    State(state): State<AppState>,
    Query(query): Query<MedicineQuery>,
) -> AppResult<Json<ApiResponse<MedicineList>>> {
    let (page, per_page) = query.pagination.normalize();
    let result = state
        .medicines
        .list(
            query.q.as_deref(),
            query.category_id,
            per_page as u64,
            page as u64,
        )
        .await?;

    let meta = Meta::new(page, per_page, result.count as i64);
    let items = result.data.into_iter().map(Medicine::from).collect();
    Ok(Json(ApiResponse::success(
        "OK",
        MedicineList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/medicines/{id}",
    params(("id" = Uuid, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Medicine detail", body = ApiResponse<Medicine>),
        (status = 404, description = "Medicine not found"),
    ),
    tag = "Medicines"
)]
pub async fn get_medicine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    let medicine = state.medicines.find_by_id(id).await?;
    Ok(Json(ApiResponse::success("OK", medicine.into(), None)))
}

#[utoipa::path(
    post,
    path = "/api/medicines",
    request_body = CreateMedicineRequest,
    responses(
        (status = 200, description = "Medicine created", body = ApiResponse<Medicine>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Medicines"
)]
pub async fn create_medicine(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMedicineRequest>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    ensure_admin(&user)?;
    let medicine = state.medicines.create(payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::MedicineCreate,
        Some(serde_json::json!({ "medicine_id": medicine.id })),
    )
    .await;
    Ok(Json(ApiResponse::success("Created", medicine.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/medicines/{id}",
    params(("id" = Uuid, Path, description = "Medicine ID")),
    request_body = UpdateMedicineRequest,
    responses(
        (status = 200, description = "Medicine updated", body = ApiResponse<Medicine>),
        (status = 404, description = "Medicine not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Medicines"
)]
pub async fn update_medicine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMedicineRequest>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    ensure_admin(&user)?;
    let medicine = state.medicines.update(id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", medicine.into(), None)))
}

#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct UpdateImageRequest {
    pub image: String,
}

#[utoipa::path(
    put,
    path = "/api/medicines/{id}/image",
    params(("id" = Uuid, Path, description = "Medicine ID")),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Image replaced", body = ApiResponse<Medicine>),
        (status = 404, description = "Medicine not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Medicines"
)]
pub async fn update_medicine_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateImageRequest>,
) -> AppResult<Json<ApiResponse<Medicine>>> {
    ensure_admin(&user)?;
    let medicine = state.medicines.update_image(id, payload.image).await?;
    Ok(Json(ApiResponse::success("Updated", medicine.into(), None)))
}

#[utoipa::path(
    delete,
    path = "/api/medicines/{id}",
    params(("id" = Uuid, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Medicine deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Medicine not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Medicines"
)]
pub async fn delete_medicine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    state.medicines.delete(id).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::MedicineDelete,
        Some(serde_json::json!({ "medicine_id": id })),
    )
    .await;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        None,
    )))
}
