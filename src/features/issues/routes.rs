use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::issues::handlers;
use crate::features::issues::services::IssueService;

/// Create routes for the issues feature
pub fn routes(service: Arc<IssueService>) -> Router {
    Router::new()
        .route("/api/issues", get(handlers::list_issues))
        .route("/api/issues/query", get(handlers::query_issues))
        .route("/api/issues/preview", get(handlers::preview_issues))
        .route("/api/issues/map", get(handlers::get_issue_map))
        .with_state(service)
}
