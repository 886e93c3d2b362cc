use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::reports::models::ReportDetail;

/// Issue priority enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "issue_priority")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Highest,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Highest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Highest => "Highest",
        }
    }

    /// Marker colour used on the issue map
    pub fn marker_color(&self) -> &'static str {
        match self {
            Priority::Highest => "#dc2626",
            Priority::Medium => "#f97316",
            Priority::Low => "#10b981",
            Priority::High => "#3b82f6",
        }
    }
}

/// Issue status enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "issue_status")]
pub enum IssueStatus {
    #[default]
    Processing,
    Completed,
    Rejected,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Processing => "Processing",
            IssueStatus::Completed => "Completed",
            IssueStatus::Rejected => "Rejected",
        }
    }
}

/// A citizen-submitted civic complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Issue {
    pub id: String,
    pub subject: String,
    pub address: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: IssueStatus,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub lng: Option<f64>,
}

impl Issue {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lng)
    }

    /// Apply the duplicated fields a report detail carries on top of this issue
    pub fn overlay(mut self, detail: &ReportDetail) -> Self {
        if let Some(subject) = &detail.subject {
            self.subject = subject.clone();
        }
        if let Some(address) = &detail.address {
            self.address = address.clone();
        }
        if let Some(date) = detail.date {
            self.date = date;
        }
        if let Some(priority) = detail.priority {
            self.priority = priority;
        }
        if let Some(status) = detail.status {
            self.status = status;
        }
        self
    }
}

/// RFC 3339, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC)
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

/// Same formats as [`parse_date`]; null or missing is `None`
pub fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
    }
}

/// Fixtures store coordinates either as numbers or numeric strings
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_fixture_row() {
        let issue: Issue = serde_json::from_str(
            r#"{
                "id": "ISS-1",
                "subject": "Pothole",
                "address": "Main Road",
                "date": "2025-09-08T09:15:00Z",
                "priority": "Highest",
                "status": "Completed",
                "lat": "23.36",
                "lng": 85.33
            }"#,
        )
        .unwrap();

        assert_eq!(issue.priority, Priority::Highest);
        assert_eq!(issue.status, IssueStatus::Completed);
        assert_eq!(issue.coordinates(), Some((23.36, 85.33)));
    }

    #[test]
    fn test_missing_enums_and_coordinates_use_defaults() {
        let issue: Issue = serde_json::from_str(
            r#"{"id": "ISS-2", "subject": "s", "address": "a", "date": "2025-01-01T00:00:00Z", "lat": null}"#,
        )
        .unwrap();

        assert_eq!(issue.priority, Priority::Low);
        assert_eq!(issue.status, IssueStatus::Processing);
        assert_eq!(issue.coordinates(), None);
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let result = serde_json::from_str::<Issue>(
            r#"{"id": "x", "subject": "s", "address": "a", "date": "2025-01-01T00:00:00Z", "priority": "Urgent"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_date_only_and_naive_dates() {
        let issue: Issue = serde_json::from_str(
            r#"{"id": "ISS-3", "subject": "s", "address": "a", "date": "2025-09-10"}"#,
        )
        .unwrap();
        assert_eq!(issue.date, Utc.with_ymd_and_hms(2025, 9, 10, 0, 0, 0).unwrap());

        assert_eq!(
            parse_date("2025-09-10T10:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 9, 10, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date("2025-09-10T10:30:00+05:30"),
            Some(Utc.with_ymd_and_hms(2025, 9, 10, 5, 0, 0).unwrap())
        );
        assert_eq!(parse_date("10/09/2025"), None);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = serde_json::from_str::<Issue>(
            r#"{"id": "x", "subject": "s", "address": "a", "date": "yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_marker_colors() {
        assert_eq!(Priority::Highest.marker_color(), "#dc2626");
        assert_eq!(Priority::Medium.marker_color(), "#f97316");
        assert_eq!(Priority::Low.marker_color(), "#10b981");
        assert_eq!(Priority::High.marker_color(), "#3b82f6");
    }
}
