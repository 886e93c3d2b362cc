use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::issues::models::Issue;
use crate::features::reports::models::ReportDetail;

/// Read-mostly access to issues and their report details
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// All issues in storage order
    async fn list_issues(&self) -> Result<Vec<Issue>>;

    async fn find_issue(&self, id: &str) -> Result<Option<Issue>> {
        Ok(self.list_issues().await?.into_iter().find(|i| i.id == id))
    }

    /// All report details in storage order
    async fn list_report_details(&self) -> Result<Vec<ReportDetail>>;

    /// First report detail with the given id
    async fn find_report_detail(&self, id: &str) -> Result<Option<ReportDetail>> {
        Ok(self
            .list_report_details()
            .await?
            .into_iter()
            .find(|d| d.id == id))
    }

    /// Store a new report detail. Fails with `Conflict` if one already exists.
    async fn insert_report_detail(&self, detail: ReportDetail) -> Result<ReportDetail>;

    /// Drop everything and load the given rows
    async fn replace_all(&self, issues: &[Issue], details: &[ReportDetail]) -> Result<()>;
}
