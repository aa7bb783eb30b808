use axum::{
    Json, Router,
    extract::State,
    routing::{post, put},
};

use crate::{
    audit::{self, AuditAction},
    dto::auth::{
        AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RefreshRequest,
        ResetPasswordRequest, SignupRequest, TokenPair,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/change-password", put(change_password))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<AuthResponse>),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let auth = state
        .auth
        .signup(payload.name, payload.email, payload.password)
        .await?;

    audit::record(
        &state.pool,
        None,
        AuditAction::Signup,
        Some(serde_json::json!({ "user_id": auth.user.id })),
    )
    .await;
    Ok(Json(ApiResponse::success("Account created", auth, None)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let auth = state.auth.login(payload.email, payload.password).await?;
    Ok(Json(ApiResponse::success("OK", auth, None)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid refresh token"),
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let tokens = state.auth.refresh(payload.refresh_token).await?;
    Ok(Json(ApiResponse::success("OK", tokens, None)))
}

#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Current password incorrect"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .auth
        .change_password(user.user_id, payload.current_password, payload.new_password)
        .await?;

    audit::record(&state.pool, Some(user.user_id), AuditAction::ChangePassword, None).await;
    Ok(Json(ApiResponse::success(
        "Password changed",
        serde_json::json!({}),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset code issued", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Unknown email"),
    ),
    tag = "Auth"
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.auth.request_password_reset(payload.email).await?;
    Ok(Json(ApiResponse::success(
        "Reset code issued",
        serde_json::json!({}),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Invalid or expired code"),
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .auth
        .reset_password(payload.email, payload.code, payload.new_password)
        .await?;
    Ok(Json(ApiResponse::success(
        "Password reset",
        serde_json::json!({}),
        None,
    )))
}
