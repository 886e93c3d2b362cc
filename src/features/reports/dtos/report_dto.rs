use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::issues::models::{Issue, IssueStatus, Priority};
use crate::features::reports::models::ReportDetail;
use crate::shared::constants::{PLACEHOLDER_DESCRIPTION, PLACEHOLDER_ENGINEER};
use crate::shared::listing::ListingRow;
use crate::shared::validation::{validate_not_blank, RECORD_ID_REGEX};

/// Column labels for the reports table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportLabels {
    pub id: String,
    pub subject: String,
    pub address: String,
    pub date: String,
    pub priority: String,
    pub status: String,
    pub actions: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            subject: "Subject".to_string(),
            address: "Address".to_string(),
            date: "Date".to_string(),
            priority: "Priority".to_string(),
            status: "Status".to_string(),
            actions: "Actions".to_string(),
        }
    }
}

/// An issue joined with its report detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRowDto {
    pub id: String,
    pub subject: String,
    pub address: String,
    pub date: DateTime<Utc>,
    pub priority: Priority,
    pub status: IssueStatus,
    pub description: String,
    pub assistant_engineer: String,
    pub junior_engineer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl ReportRowDto {
    /// Join an issue with its detail, filling placeholders for absent fields.
    /// The issue's own fields win over duplicated copies on the detail.
    pub fn merge(issue: Issue, detail: Option<&ReportDetail>) -> Self {
        Self {
            description: or_placeholder(
                detail.and_then(|d| d.description.as_deref()),
                PLACEHOLDER_DESCRIPTION,
            ),
            assistant_engineer: or_placeholder(
                detail.and_then(|d| d.assistant_engineer.as_deref()),
                PLACEHOLDER_ENGINEER,
            ),
            junior_engineer: or_placeholder(
                detail.and_then(|d| d.junior_engineer.as_deref()),
                PLACEHOLDER_ENGINEER,
            ),
            id: issue.id,
            subject: issue.subject,
            address: issue.address,
            date: issue.date,
            priority: issue.priority,
            status: issue.status,
            lat: issue.lat,
            lng: issue.lng,
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

impl ListingRow for ReportRowDto {
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

/// Response of `GET /api/reports`
///
/// `reports` repeats `rows` for clients written against the older payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportListResponseDto {
    pub labels: ReportLabels,
    pub rows: Vec<ReportRowDto>,
    pub reports: Vec<ReportRowDto>,
}

/// Request DTO for creating a report detail
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    /// Id of the issue this detail belongs to
    #[validate(
        length(min = 1, max = 32, message = "id must be 1-32 characters"),
        regex(path = *RECORD_ID_REGEX, message = "id may only contain letters, digits, '-' and '_'")
    )]
    pub id: String,

    #[validate(
        length(min = 1, max = 2000, message = "description must be 1-2000 characters"),
        custom(function = "validate_not_blank", message = "description must not be blank")
    )]
    pub description: String,

    #[validate(length(max = 100, message = "assistantEngineer must be at most 100 characters"))]
    pub assistant_engineer: Option<String>,

    #[validate(length(max = 100, message = "juniorEngineer must be at most 100 characters"))]
    pub junior_engineer: Option<String>,
}

impl From<CreateReportDto> for ReportDetail {
    fn from(dto: CreateReportDto) -> Self {
        Self {
            id: dto.id,
            description: Some(dto.description),
            assistant_engineer: dto.assistant_engineer.filter(|s| !s.trim().is_empty()),
            junior_engineer: dto.junior_engineer.filter(|s| !s.trim().is_empty()),
            subject: None,
            address: None,
            date: None,
            priority: None,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{detail, issue};

    #[test]
    fn test_merge_uses_placeholders_without_detail() {
        let row = ReportRowDto::merge(issue("ISS-1", Priority::High, IssueStatus::Processing), None);
        assert_eq!(row.description, "No description available");
        assert_eq!(row.assistant_engineer, "Not assigned");
        assert_eq!(row.junior_engineer, "Not assigned");
        assert_eq!(row.priority, Priority::High);
    }

    #[test]
    fn test_merge_keeps_issue_fields_authoritative() {
        let mut d = detail("ISS-1", "Leaking pipe");
        d.priority = Some(Priority::Highest);
        d.address = Some("Elsewhere".to_string());
        d.junior_engineer = Some("   ".to_string());

        let row = ReportRowDto::merge(issue("ISS-1", Priority::Low, IssueStatus::Processing), Some(&d));
        assert_eq!(row.description, "Leaking pipe");
        assert_eq!(row.assistant_engineer, "Assistant");
        assert_eq!(row.junior_engineer, "Not assigned");
        assert_eq!(row.priority, Priority::Low);
        assert_eq!(row.address, "Address ISS-1");
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = ReportRowDto::merge(issue("ISS-1", Priority::Low, IssueStatus::Completed), None);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["assistantEngineer"], "Not assigned");
        assert_eq!(value["juniorEngineer"], "Not assigned");
        assert_eq!(value["status"], "Completed");
        assert!(value.get("lat").is_none());
    }

    #[test]
    fn test_create_dto_validation() {
        let valid = CreateReportDto {
            id: "ISS-1001".to_string(),
            description: "Pothole".to_string(),
            assistant_engineer: None,
            junior_engineer: Some("Rohit".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_id = CreateReportDto {
            id: "ISS 1001".to_string(),
            ..valid.clone()
        };
        assert!(bad_id.validate().is_err());

        let empty_description = CreateReportDto {
            description: String::new(),
            ..valid.clone()
        };
        assert!(empty_description.validate().is_err());

        let blank_description = CreateReportDto {
            description: "   ".to_string(),
            ..valid
        };
        assert!(blank_description.validate().is_err());
    }
}
