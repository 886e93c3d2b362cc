use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::issues::dtos::{
    IssueListResponseDto, IssueMapDto, IssuePreviewDto, IssueRowDto, PreviewQuery,
};
use crate::features::issues::services::IssueService;
use crate::shared::constants::DEFAULT_PREVIEW_ROWS;
use crate::shared::listing::{ListingPage, ListingQuery};
use crate::shared::types::{ApiResponse, Meta};

/// List all issues
///
/// Returns every issue with the table's column labels. No filtering or paging.
#[utoipa::path(
    get,
    path = "/api/issues",
    responses(
        (status = 200, description = "All issues", body = IssueListResponseDto),
        (status = 500, description = "Storage error")
    ),
    tag = "issues"
)]
pub async fn list_issues(
    State(service): State<Arc<IssueService>>,
) -> Result<Json<IssueListResponseDto>> {
    let list = service.list().await?;
    Ok(Json(list))
}

/// Filter, sort and paginate issues
#[utoipa::path(
    get,
    path = "/api/issues/query",
    params(ListingQuery),
    responses(
        (status = 200, description = "One page of issues", body = ApiResponse<ListingPage<IssueRowDto>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Storage error")
    ),
    tag = "issues"
)]
pub async fn query_issues(
    State(service): State<Arc<IssueService>>,
    AppQuery(query): AppQuery<ListingQuery>,
) -> Result<Json<ApiResponse<ListingPage<IssueRowDto>>>> {
    let page = service.query(&query, Utc::now()).await?;
    let total = page.filtered as i64;
    Ok(Json(ApiResponse::success(
        Some(page),
        None,
        Some(Meta { total }),
    )))
}

/// First few issues for the dashboard table
#[utoipa::path(
    get,
    path = "/api/issues/preview",
    params(PreviewQuery),
    responses(
        (status = 200, description = "Issue preview", body = ApiResponse<IssuePreviewDto>),
    ),
    tag = "issues"
)]
pub async fn preview_issues(
    State(service): State<Arc<IssueService>>,
    AppQuery(query): AppQuery<PreviewQuery>,
) -> Result<Json<ApiResponse<IssuePreviewDto>>> {
    let preview = service
        .preview(query.limit.unwrap_or(DEFAULT_PREVIEW_ROWS))
        .await?;
    Ok(Json(ApiResponse::success(Some(preview), None, None)))
}

/// Issue markers for the map view
#[utoipa::path(
    get,
    path = "/api/issues/map",
    responses(
        (status = 200, description = "Map center and markers", body = ApiResponse<IssueMapDto>),
    ),
    tag = "issues"
)]
pub async fn get_issue_map(
    State(service): State<Arc<IssueService>>,
) -> Result<Json<ApiResponse<IssueMapDto>>> {
    let map = service.map().await?;
    Ok(Json(ApiResponse::success(Some(map), None, None)))
}
