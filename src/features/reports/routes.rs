use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/query", get(handlers::query_reports))
        .route("/api/reports/export", get(handlers::export_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .with_state(service)
}
