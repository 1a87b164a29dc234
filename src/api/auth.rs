//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        account::{AccountInfo, RegisterCustomer},
        enums::AccountKind,
    },
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account kind ("customer", "trainer", "manager")
    pub kind: AccountKind,
    pub email: String,
    pub password: String,
}

/// Login response with JWT token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub account: AccountInfo,
}

/// Password reset request
#[derive(Deserialize, ToSchema)]
pub struct ResetRequest {
    pub kind: AccountKind,
    pub email: String,
}

/// Password reset confirmation
#[derive(Deserialize, ToSchema)]
pub struct ResetConfirm {
    pub kind: AccountKind,
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Generic status response
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Log in and obtain a JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, account) = state
        .services
        .auth
        .authenticate(request.kind, &request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        account: AccountInfo {
            id: account.id,
            kind: request.kind,
            name: account.name,
            email: account.email,
            phone: account.phone,
        },
    }))
}

/// Get the authenticated account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AccountInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AccountInfo>> {
    let account = state.services.auth.account_for(&claims).await?;
    Ok(Json(account))
}

/// Register a new customer account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterCustomer,
    responses(
        (status = 201, description = "Customer registered", body = AccountInfo),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterCustomer>,
) -> AppResult<(StatusCode, Json<AccountInfo>)> {
    let account = state.services.auth.register_customer(&request).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Request a password-reset code by email
#[utoipa::path(
    post,
    path = "/auth/password-reset/request",
    tag = "auth",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Reset code sent if the account exists", body = StatusResponse)
    )
)]
pub async fn request_password_reset(
    State(state): State<crate::AppState>,
    Json(request): Json<ResetRequest>,
) -> AppResult<Json<StatusResponse>> {
    state
        .services
        .auth
        .request_password_reset(request.kind, &request.email)
        .await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "If the account exists, a reset code has been sent".to_string(),
    }))
}

/// Complete a password reset with the emailed code
#[utoipa::path(
    post,
    path = "/auth/password-reset/confirm",
    tag = "auth",
    request_body = ResetConfirm,
    responses(
        (status = 200, description = "Password updated", body = StatusResponse),
        (status = 401, description = "Invalid or expired code")
    )
)]
pub async fn confirm_password_reset(
    State(state): State<crate::AppState>,
    Json(request): Json<ResetConfirm>,
) -> AppResult<Json<StatusResponse>> {
    state
        .services
        .auth
        .confirm_password_reset(request.kind, &request.email, &request.code, &request.new_password)
        .await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "Password updated".to_string(),
    }))
}
