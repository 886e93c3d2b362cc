use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardSummaryDto, PriorityCountDto};
use crate::features::issues::models::{Issue, IssueStatus, Priority};
use crate::modules::storage::DataStore;

pub struct DashboardService {
    store: Arc<dyn DataStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let issues = self.store.list_issues().await?;
        let details = self.store.list_report_details().await?;

        let detail_ids: HashSet<&str> = details.iter().map(|d| d.id.as_str()).collect();
        let with_details = issues
            .iter()
            .filter(|i| detail_ids.contains(i.id.as_str()))
            .count() as i64;

        Ok(DashboardSummaryDto {
            total_reports: issues.len() as i64,
            active_issues: count_status(&issues, IssueStatus::Processing),
            total_solved: count_status(&issues, IssueStatus::Completed),
            rejected: count_status(&issues, IssueStatus::Rejected),
            with_details,
            by_priority: Priority::ALL
                .iter()
                .map(|&priority| PriorityCountDto {
                    priority,
                    count: issues.iter().filter(|i| i.priority == priority).count() as i64,
                })
                .collect(),
        })
    }
}

fn count_status(issues: &[Issue], status: IssueStatus) -> i64 {
    issues.iter().filter(|i| i.status == status).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{bundled_fixture_store, detail, issue, InMemoryStore};

    #[tokio::test]
    async fn test_summary_over_bundled_fixtures() {
        let service = DashboardService::new(bundled_fixture_store());
        let summary = service.get_summary().await.unwrap();

        assert_eq!(summary.total_reports, 16);
        assert_eq!(summary.active_issues, 6);
        assert_eq!(summary.total_solved, 7);
        assert_eq!(summary.rejected, 3);
        // the orphan ISS-2001 and the duplicate ISS-1004 do not count
        assert_eq!(summary.with_details, 10);
        assert!(summary.by_priority.iter().all(|p| p.count == 4));
    }

    #[tokio::test]
    async fn test_summary_of_empty_store() {
        let service = DashboardService::new(Arc::new(InMemoryStore::default()));
        let summary = service.get_summary().await.unwrap();

        assert_eq!(summary.total_reports, 0);
        assert_eq!(summary.with_details, 0);
        assert_eq!(summary.by_priority.len(), 4);
        assert_eq!(summary.by_priority[0].priority, Priority::Low);
        assert_eq!(summary.by_priority[3].priority, Priority::Highest);
    }

    #[tokio::test]
    async fn test_status_counts_partition_total() {
        let issues = vec![
            issue("A-1", Priority::High, IssueStatus::Processing),
            issue("A-2", Priority::High, IssueStatus::Rejected),
            issue("A-3", Priority::Low, IssueStatus::Completed),
            issue("A-4", Priority::Medium, IssueStatus::Completed),
        ];
        let service = DashboardService::new(Arc::new(InMemoryStore::new(
            issues,
            vec![detail("A-3", "done")],
        )));
        let summary = service.get_summary().await.unwrap();

        assert_eq!(
            summary.active_issues + summary.total_solved + summary.rejected,
            summary.total_reports
        );
        assert_eq!(summary.with_details, 1);
        let high = summary
            .by_priority
            .iter()
            .find(|p| p.priority == Priority::High)
            .unwrap();
        assert_eq!(high.count, 2);
    }
}
