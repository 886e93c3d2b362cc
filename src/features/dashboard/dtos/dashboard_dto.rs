use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::issues::models::Priority;

/// Issue count for one priority level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountDto {
    pub priority: Priority,
    pub count: i64,
}

/// KPI cards for the analytics header
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    /// Every issue on record
    pub total_reports: i64,
    /// Issues still `Processing`
    pub active_issues: i64,
    /// Issues `Completed`
    pub total_solved: i64,
    pub rejected: i64,
    /// Issues that already have a report detail
    pub with_details: i64,
    /// Lowest to highest
    pub by_priority: Vec<PriorityCountDto>,
}
