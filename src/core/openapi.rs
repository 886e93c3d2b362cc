use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::issues::{
    dtos as issues_dtos, handlers as issues_handlers, models as issues_models,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::listing::{DateRange, ListingPage, PageWindow};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Issues
        issues_handlers::list_issues,
        issues_handlers::query_issues,
        issues_handlers::preview_issues,
        issues_handlers::get_issue_map,
        // Reports
        reports_handlers::list_reports,
        reports_handlers::query_reports,
        reports_handlers::export_reports,
        reports_handlers::get_report,
        reports_handlers::create_report,
        // Dashboard
        dashboard_handlers::get_summary,
        // Auth
        auth_handlers::login,
        auth_handlers::login_options,
    ),
    components(
        schemas(
            Meta,
            DateRange,
            PageWindow,
            // Issues
            issues_models::Priority,
            issues_models::IssueStatus,
            issues_dtos::IssueLabels,
            issues_dtos::IssueRowDto,
            issues_dtos::IssueListResponseDto,
            issues_dtos::IssuePreviewDto,
            issues_dtos::MapPoint,
            issues_dtos::MapMarkerDto,
            issues_dtos::IssueMapDto,
            ListingPage<issues_dtos::IssueRowDto>,
            ApiResponse<ListingPage<issues_dtos::IssueRowDto>>,
            ApiResponse<issues_dtos::IssuePreviewDto>,
            ApiResponse<issues_dtos::IssueMapDto>,
            // Reports
            reports_models::ReportDetail,
            reports_dtos::ReportLabels,
            reports_dtos::ReportRowDto,
            reports_dtos::ReportListResponseDto,
            reports_dtos::CreateReportDto,
            ListingPage<reports_dtos::ReportRowDto>,
            ApiResponse<ListingPage<reports_dtos::ReportRowDto>>,
            ApiResponse<reports_dtos::ReportRowDto>,
            ApiResponse<reports_models::ReportDetail>,
            // Dashboard
            dashboard_dtos::PriorityCountDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::SessionDto,
            auth_dtos::LoginOptionsDto,
            ApiResponse<auth_dtos::SessionDto>,
            ApiResponse<auth_dtos::LoginOptionsDto>,
        )
    ),
    tags(
        (name = "issues", description = "Raw civic issues, preview table and map markers"),
        (name = "reports", description = "Issues joined with report details"),
        (name = "dashboard", description = "Analytics header KPIs"),
        (name = "auth", description = "Department officer login"),
    ),
    info(
        title = "Nagar Seva API",
        version = "0.1.0",
        description = "Civic issue reporting admin API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/issues",
            "/api/issues/query",
            "/api/issues/preview",
            "/api/issues/map",
            "/api/reports",
            "/api/reports/query",
            "/api/reports/export",
            "/api/reports/{id}",
            "/api/dashboard/summary",
            "/api/auth/login",
            "/api/auth/options",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Overridden".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Overridden"));
    }
}
