use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::users::UpdateProfileRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user's profile", body = ApiResponse<User>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let profile = state.users.find_by_id(user.user_id).await?;
    Ok(Json(ApiResponse::success("OK", profile.into(), None)))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let profile = state.users.update_profile(user.user_id, payload).await?;
    Ok(Json(ApiResponse::success("Updated", profile.into(), None)))
}
