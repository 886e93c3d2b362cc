use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::core::config::FixtureConfig;
use crate::core::error::{AppError, Result};
use crate::features::issues::models::{Issue, IssueStatus, Priority};
use crate::features::reports::models::ReportDetail;
use crate::modules::storage::{DataStore, FixtureStore};

/// Store over the fixtures bundled in `data/`
pub fn bundled_fixture_store() -> Arc<dyn DataStore> {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    Arc::new(FixtureStore::new(&FixtureConfig {
        issues_path: data.join("issues.json"),
        report_details_path: data.join("reportDetails.json"),
    }))
}

/// Path to a file in the bundled `data/` directory
pub fn data_file(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Fixed clock used by date-sensitive tests (the fixtures end mid-September 2025)
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0).unwrap()
}

pub fn issue(id: &str, priority: Priority, status: IssueStatus) -> Issue {
    Issue {
        id: id.to_string(),
        subject: format!("Subject {}", id),
        address: format!("Address {}", id),
        date: fixed_now(),
        priority,
        status,
        lat: None,
        lng: None,
    }
}

pub fn detail(id: &str, description: &str) -> ReportDetail {
    ReportDetail {
        id: id.to_string(),
        description: Some(description.to_string()),
        assistant_engineer: Some("Assistant".to_string()),
        junior_engineer: Some("Junior".to_string()),
        subject: None,
        address: None,
        date: None,
        priority: None,
        status: None,
    }
}

/// Store holding everything in memory
#[derive(Default)]
pub struct InMemoryStore {
    issues: RwLock<Vec<Issue>>,
    details: RwLock<Vec<ReportDetail>>,
}

impl InMemoryStore {
    pub fn new(issues: Vec<Issue>, details: Vec<ReportDetail>) -> Self {
        Self {
            issues: RwLock::new(issues),
            details: RwLock::new(details),
        }
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        Ok(self.issues.read().await.clone())
    }

    async fn list_report_details(&self) -> Result<Vec<ReportDetail>> {
        Ok(self.details.read().await.clone())
    }

    async fn insert_report_detail(&self, detail: ReportDetail) -> Result<ReportDetail> {
        let mut details = self.details.write().await;
        if details.iter().any(|d| d.id == detail.id) {
            return Err(AppError::Conflict(format!(
                "Report '{}' already exists",
                detail.id
            )));
        }
        details.push(detail.clone());
        Ok(detail)
    }

    async fn replace_all(&self, issues: &[Issue], details: &[ReportDetail]) -> Result<()> {
        *self.issues.write().await = issues.to_vec();
        *self.details.write().await = details.to_vec();
        Ok(())
    }
}

/// Store whose every read fails, for error-path tests
pub struct FailingStore;

#[async_trait]
impl DataStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        Err(AppError::Fixture(
            "Failed to read data/issues.json: No such file or directory".to_string(),
        ))
    }

    async fn list_report_details(&self) -> Result<Vec<ReportDetail>> {
        Err(AppError::Fixture(
            "Failed to read data/reportDetails.json: No such file or directory".to_string(),
        ))
    }

    async fn insert_report_detail(&self, _detail: ReportDetail) -> Result<ReportDetail> {
        Err(AppError::Fixture("store unavailable".to_string()))
    }

    async fn replace_all(&self, _issues: &[Issue], _details: &[ReportDetail]) -> Result<()> {
        Err(AppError::Fixture("store unavailable".to_string()))
    }
}
