use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::reports::dtos::{CreateReportDto, ReportListResponseDto, ReportRowDto};
use crate::features::reports::models::ReportDetail;
use crate::features::reports::services::ReportService;
use crate::shared::listing::{ListingPage, ListingQuery};
use crate::shared::types::{ApiResponse, Meta};

/// List all reports
///
/// Every issue joined with its report detail, in storage order.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = ReportListResponseDto),
        (status = 500, description = "Storage error")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ReportListResponseDto>> {
    let list = service.list().await?;
    Ok(Json(list))
}

/// Filter, sort and paginate reports
#[utoipa::path(
    get,
    path = "/api/reports/query",
    params(ListingQuery),
    responses(
        (status = 200, description = "One page of reports", body = ApiResponse<ListingPage<ReportRowDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Storage error")
    ),
    tag = "reports"
)]
pub async fn query_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ListingQuery>,
) -> Result<Json<ApiResponse<ListingPage<ReportRowDto>>>> {
    let page = service.query(&query, Utc::now()).await?;
    let total = page.filtered as i64;
    Ok(Json(ApiResponse::success(
        Some(page),
        None,
        Some(Meta { total }),
    )))
}

/// Export reports as CSV
///
/// Same filters as `/api/reports/query`, newest first, every matching row.
#[utoipa::path(
    get,
    path = "/api/reports/export",
    params(ListingQuery),
    responses(
        (status = 200, description = "CSV file of matching reports", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Storage error")
    ),
    tag = "reports"
)]
pub async fn export_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ListingQuery>,
) -> Result<impl IntoResponse> {
    let csv = service.export_csv(&query, Utc::now()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"reports.csv\""),
        ],
        csv,
    ))
}

/// Get a single report by issue id
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Issue id")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportRowDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportRowDto>>> {
    let report = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Create a report detail for an existing issue
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report detail created", body = ApiResponse<ReportDetail>),
        (status = 400, description = "Invalid body or unknown issue"),
        (status = 409, description = "Report detail already exists")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportDetail>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let detail = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(detail),
            Some("Report created".to_string()),
            None,
        )),
    ))
}
