use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::issues::models::{
    deserialize_optional_date, Issue, IssueStatus, Priority,
};

/// Supplementary descriptive fields joined to an issue by `id`
///
/// Later fixture revisions duplicate some issue fields here; those copies are
/// optional and may disagree with the issue they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assistant_engineer: Option<String>,
    #[serde(default)]
    pub junior_engineer: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<IssueStatus>,
}

impl ReportDetail {
    /// Names of duplicated fields whose value differs from the issue's
    pub fn divergent_fields(&self, issue: &Issue) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.subject.as_ref().is_some_and(|s| *s != issue.subject) {
            fields.push("subject");
        }
        if self.address.as_ref().is_some_and(|a| *a != issue.address) {
            fields.push("address");
        }
        if self.date.is_some_and(|d| d != issue.date) {
            fields.push("date");
        }
        if self.priority.is_some_and(|p| p != issue.priority) {
            fields.push("priority");
        }
        if self.status.is_some_and(|s| s != issue.status) {
            fields.push("status");
        }
        fields
    }
}
