use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginOptionsDto, LoginRequestDto, SessionDto};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login as a department officer
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<SessionDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<SessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(dto)?;
    Ok(Json(ApiResponse::success(
        Some(session),
        Some("Login successful".to_string()),
        None,
    )))
}

/// Departments, roles and districts available on the login form
#[utoipa::path(
    get,
    path = "/api/auth/options",
    responses(
        (status = 200, description = "Login form options", body = ApiResponse<LoginOptionsDto>)
    ),
    tag = "auth"
)]
pub async fn login_options(
    State(service): State<Arc<AuthService>>,
) -> Json<ApiResponse<LoginOptionsDto>> {
    Json(ApiResponse::success(Some(service.options()), None, None))
}
