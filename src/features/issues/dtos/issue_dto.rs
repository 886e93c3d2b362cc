use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::issues::models::{Issue, IssueStatus, Priority};
use crate::shared::listing::ListingRow;

/// Column labels for the issues table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueLabels {
    pub id: String,
    pub subject: String,
    pub address: String,
    pub date: String,
    pub priority: String,
    pub status: String,
    pub report: String,
}

impl Default for IssueLabels {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            subject: "Subject".to_string(),
            address: "ADDRESS".to_string(),
            date: "DATE".to_string(),
            priority: "PRIORITY".to_string(),
            status: "STATUS".to_string(),
            report: "REPORT".to_string(),
        }
    }
}

/// One row of the issues table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IssueRowDto {
    pub id: String,
    pub subject: String,
    pub address: String,
    pub date: DateTime<Utc>,
    pub priority: Priority,
    pub status: IssueStatus,
    /// Linked report reference; issues never carry one, kept for the column layout
    pub report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl From<Issue> for IssueRowDto {
    fn from(i: Issue) -> Self {
        Self {
            id: i.id,
            subject: i.subject,
            address: i.address,
            date: i.date,
            priority: i.priority,
            status: i.status,
            report: None,
            lat: i.lat,
            lng: i.lng,
        }
    }
}

impl ListingRow for IssueRowDto {
    fn row_id(&self) -> &str {
        &self.id
    }
    fn subject(&self) -> &str {
        &self.subject
    }
    fn address(&self) -> &str {
        &self.address
    }
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
    fn priority(&self) -> &str {
        self.priority.as_str()
    }
    fn status(&self) -> &str {
        self.status.as_str()
    }
}

/// Response of `GET /api/issues`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueListResponseDto {
    pub labels: IssueLabels,
    pub rows: Vec<IssueRowDto>,
}

// =============================================================================
// PREVIEW
// =============================================================================

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PreviewQuery {
    /// Number of rows to return (default: 5)
    pub limit: Option<usize>,
}

/// Collapsed issues table shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuePreviewDto {
    pub labels: IssueLabels,
    pub rows: Vec<IssueRowDto>,
    pub total: usize,
    pub has_more: bool,
}

// =============================================================================
// MAP
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Issue marker for the map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapMarkerDto {
    pub id: String,
    pub subject: String,
    pub address: String,
    pub priority: Priority,
    pub status: IssueStatus,
    pub lat: f64,
    pub lng: f64,
    /// Marker fill colour derived from priority
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueMapDto {
    pub center: MapPoint,
    pub zoom: u8,
    pub markers: Vec<MapMarkerDto>,
}
