use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get dashboard KPI summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
