use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    dto::pharmacies::{
        CreatePharmacyRequest, PharmacyList, PharmacyStockLine, PharmacyStockList,
        SetPharmacyMedicineRequest, UpdatePharmacyRequest,
    },
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Pharmacy, PharmacyMedicine},
    response::{ApiResponse, Meta},
    routes::params::PharmacyQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pharmacies).post(create_pharmacy))
        .route("/mine", get(list_my_pharmacies))
        .route(
            "/{id}",
            get(get_pharmacy).put(update_pharmacy).delete(delete_pharmacy),
        )
        .route("/{id}/status", put(toggle_pharmacy_status))
        .route("/{id}/medicines", get(list_pharmacy_stock))
        .route("/{id}/medicines/{medicine_id}", put(set_pharmacy_medicine))
}

#[utoipa::path(
    get,
    path = "/api/pharmacies",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("owner_phone" = Option<String>, Query, description = "Only pharmacies whose owner has this phone")
    ),
    responses(
        (status = 200, description = "Pharmacy page", body = ApiResponse<PharmacyList>)
    ),
    tag = "Pharmacies"
)]
pub async fn list_pharmacies(
    State(state): State<AppState>,
    Query(query): Query<PharmacyQuery>,
) -> AppResult<Json<ApiResponse<PharmacyList>>> {
    let (page, per_page) = query.pagination.normalize();

    let (data, total) = match query.owner_phone.as_deref() {
        Some(phone) => {
            let result = state
                .pharmacies
                .find_by_owner_phone(phone, per_page as u64, page as u64)
                .await?;
            (result.data, result.count as i64)
        }
        None => {
            let result = state
                .pharmacies
                .list(page as u64, per_page as u64)
                .await?;
            (result.data, result.meta.total as i64)
        }
    };

    let meta = Meta::new(page, per_page, total);
    let items = data.into_iter().map(Pharmacy::from).collect();
    Ok(Json(ApiResponse::success(
        "OK",
        PharmacyList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/pharmacies/mine",
    responses(
        (status = 200, description = "Pharmacies owned by the current user", body = ApiResponse<PharmacyList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn list_my_pharmacies(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PharmacyList>>> {
    let items = state
        .pharmacies
        .find_by_owner(user.user_id)
        .await?
        .into_iter()
        .map(Pharmacy::from)
        .collect();
    Ok(Json(ApiResponse::success(
        "OK",
        PharmacyList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/pharmacies/{id}",
    params(("id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Pharmacy detail", body = ApiResponse<Pharmacy>),
        (status = 404, description = "Pharmacy not found"),
    ),
    tag = "Pharmacies"
)]
pub async fn get_pharmacy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pharmacy>>> {
    let pharmacy = state.pharmacies.find_by_id(id).await?;
    Ok(Json(ApiResponse::success("OK", pharmacy.into(), None)))
}

#[utoipa::path(
    post,
    path = "/api/pharmacies",
    request_body = CreatePharmacyRequest,
    responses(
        (status = 200, description = "Pharmacy created", body = ApiResponse<Pharmacy>),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn create_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePharmacyRequest>,
) -> AppResult<Json<ApiResponse<Pharmacy>>> {
    ensure_admin(&user)?;
    let pharmacy = state.pharmacies.create(Some(user.user_id), payload).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        AuditAction::PharmacyCreate,
        Some(serde_json::json!({ "pharmacy_id": pharmacy.id })),
    )
    .await;
    Ok(Json(ApiResponse::success("Created", pharmacy.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/pharmacies/{id}",
    params(("id" = Uuid, Path, description = "Pharmacy ID")),
    request_body = UpdatePharmacyRequest,
    responses(
        (status = 200, description = "Pharmacy updated", body = ApiResponse<Pharmacy>),
        (status = 404, description = "Pharmacy not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn update_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePharmacyRequest>,
) -> AppResult<Json<ApiResponse<Pharmacy>>> {
    ensure_admin(&user)?;
    let pharmacy = state.pharmacies.update(id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", pharmacy.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/pharmacies/{id}/status",
    params(("id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Active flag flipped", body = ApiResponse<Pharmacy>),
        (status = 404, description = "Pharmacy not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn toggle_pharmacy_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pharmacy>>> {
    ensure_admin(&user)?;
    let pharmacy = state.pharmacies.toggle_status(id).await?;
    Ok(Json(ApiResponse::success("Updated", pharmacy.into(), None)))
}

#[utoipa::path(
    delete,
    path = "/api/pharmacies/{id}",
    params(("id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Pharmacy deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Pharmacy not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn delete_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    state.pharmacies.delete(id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/pharmacies/{id}/medicines",
    params(("id" = Uuid, Path, description = "Pharmacy ID")),
    responses(
        (status = 200, description = "Per-pharmacy stock with medicine details", body = ApiResponse<PharmacyStockList>),
        (status = 404, description = "Pharmacy not found"),
    ),
    tag = "Pharmacies"
)]
pub async fn list_pharmacy_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PharmacyStockList>>> {
    let items: Vec<PharmacyStockLine> = state.pharmacies.list_stock(id).await?;
    Ok(Json(ApiResponse::success(
        "OK",
        PharmacyStockList { items },
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/pharmacies/{id}/medicines/{medicine_id}",
    params(
        ("id" = Uuid, Path, description = "Pharmacy ID"),
        ("medicine_id" = Uuid, Path, description = "Medicine ID")
    ),
    request_body = SetPharmacyMedicineRequest,
    responses(
        (status = 200, description = "Stock row created or replaced", body = ApiResponse<PharmacyMedicine>),
        (status = 404, description = "Pharmacy not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pharmacies"
)]
pub async fn set_pharmacy_medicine(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, medicine_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SetPharmacyMedicineRequest>,
) -> AppResult<Json<ApiResponse<PharmacyMedicine>>> {
    ensure_admin(&user)?;
    let row = state.pharmacies.set_medicine(id, medicine_id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", row.into(), None)))
}
