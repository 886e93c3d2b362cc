use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::core::config::FixtureConfig;
use crate::core::error::{AppError, Result};
use crate::features::issues::models::Issue;
use crate::features::reports::models::ReportDetail;
use crate::modules::storage::DataStore;

/// Layout of `issues.json`. Authored `labels` are ignored; the API serves its own.
#[derive(Debug, Deserialize)]
struct IssuesFixture {
    rows: Vec<Issue>,
}

/// Layout of `reportDetails.json`
#[derive(Debug, Deserialize)]
struct ReportDetailsFixture {
    reports: Vec<ReportDetail>,
}

/// Store backed by JSON fixture files
///
/// Files are re-read on every call. Created report details are kept in memory
/// only; the fixtures on disk are never rewritten.
pub struct FixtureStore {
    issues_path: PathBuf,
    report_details_path: PathBuf,
    created: RwLock<Vec<ReportDetail>>,
}

impl FixtureStore {
    pub fn new(config: &FixtureConfig) -> Self {
        Self {
            issues_path: config.issues_path.clone(),
            report_details_path: config.report_details_path.clone(),
            created: RwLock::new(Vec::new()),
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Fixture(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Fixture(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl DataStore for FixtureStore {
    fn backend_name(&self) -> &'static str {
        "json-fixtures"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        let fixture: IssuesFixture = Self::read_json(&self.issues_path).await?;
        Ok(fixture.rows)
    }

    async fn list_report_details(&self) -> Result<Vec<ReportDetail>> {
        let fixture: ReportDetailsFixture = Self::read_json(&self.report_details_path).await?;
        let mut details = fixture.reports;
        details.extend(self.created.read().await.iter().cloned());
        Ok(details)
    }

    async fn insert_report_detail(&self, detail: ReportDetail) -> Result<ReportDetail> {
        let on_disk: ReportDetailsFixture = Self::read_json(&self.report_details_path).await?;

        let mut created = self.created.write().await;
        let exists = on_disk
            .reports
            .iter()
            .chain(created.iter())
            .any(|d| d.id == detail.id);
        if exists {
            return Err(AppError::Conflict(format!(
                "Report '{}' already exists",
                detail.id
            )));
        }

        created.push(detail.clone());
        tracing::debug!(
            "Report detail {} kept in memory ({} created this run)",
            detail.id,
            created.len()
        );
        Ok(detail)
    }

    async fn replace_all(&self, _issues: &[Issue], _details: &[ReportDetail]) -> Result<()> {
        Err(AppError::BadRequest(
            "JSON fixtures are read-only; configure DATABASE_URL to seed".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(file: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
    }

    fn bundled_store() -> FixtureStore {
        FixtureStore::new(&FixtureConfig {
            issues_path: data_path("issues.json"),
            report_details_path: data_path("reportDetails.json"),
        })
    }

    #[tokio::test]
    async fn test_reads_bundled_fixtures() {
        let store = bundled_store();

        let issues = store.list_issues().await.unwrap();
        assert!(!issues.is_empty());

        let details = store.list_report_details().await.unwrap();
        assert!(!details.is_empty());

        let first = &issues[0];
        let found = store.find_issue(&first.id).await.unwrap();
        assert_eq!(found.as_ref(), Some(first));
    }

    #[tokio::test]
    async fn test_missing_file_is_fixture_error() {
        let store = FixtureStore::new(&FixtureConfig {
            issues_path: data_path("does-not-exist.json"),
            report_details_path: data_path("reportDetails.json"),
        });

        let err = store.list_issues().await.unwrap_err();
        match err {
            AppError::Fixture(msg) => assert!(msg.contains("does-not-exist.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_created_detail_is_listed_and_duplicates_rejected() {
        let store = bundled_store();
        let detail = ReportDetail {
            id: "ISS-9999".to_string(),
            description: Some("Open manhole".to_string()),
            assistant_engineer: None,
            junior_engineer: None,
            subject: None,
            address: None,
            date: None,
            priority: None,
            status: None,
        };

        store.insert_report_detail(detail.clone()).await.unwrap();
        let found = store.find_report_detail("ISS-9999").await.unwrap();
        assert_eq!(found, Some(detail.clone()));

        let err = store.insert_report_detail(detail).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_date_only_fixture_row_is_served() {
        let issues_path =
            std::env::temp_dir().join(format!("issues-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(
            &issues_path,
            r#"{"labels": {"id": "ID"}, "rows": [
                {"id": "ISS-1", "subject": "s", "address": "a", "date": "2025-09-10T10:30:00Z"},
                {"id": "ISS-2", "subject": "s", "address": "a", "date": "2025-09-10"}
            ]}"#,
        )
        .await
        .unwrap();

        let store = FixtureStore::new(&FixtureConfig {
            issues_path: issues_path.clone(),
            report_details_path: data_path("reportDetails.json"),
        });
        let issues = store.list_issues().await;
        tokio::fs::remove_file(&issues_path).await.unwrap();

        let issues = issues.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].date.to_rfc3339(), "2025-09-10T00:00:00+00:00");
    }

    #[test]
    fn test_replace_all_is_rejected() {
        let store = bundled_store();
        let err = tokio_test::block_on(store.replace_all(&[], &[])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
