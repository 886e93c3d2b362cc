use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::issues::models::Issue;
use crate::features::reports::models::ReportDetail;
use crate::modules::storage::DataStore;

/// Counts reported after a seed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub issues: usize,
    pub report_details: usize,
    pub duplicate_details: usize,
}

/// Copies one store's contents into another, replacing whatever the target held
pub struct SeedService {
    source: Arc<dyn DataStore>,
    target: Arc<dyn DataStore>,
}

impl SeedService {
    pub fn new(source: Arc<dyn DataStore>, target: Arc<dyn DataStore>) -> Self {
        Self { source, target }
    }

    pub async fn run(&self) -> Result<SeedSummary> {
        let issues = self.source.list_issues().await?;
        let details = self.source.list_report_details().await?;
        tracing::info!(
            "Seeding {} from {}: {} issues, {} report details",
            self.target.backend_name(),
            self.source.backend_name(),
            issues.len(),
            details.len()
        );

        let (details, duplicate_details) = first_per_id(details);
        if duplicate_details > 0 {
            tracing::warn!(
                "Skipped {} duplicate report details (first per id kept)",
                duplicate_details
            );
        }
        let issues = overlay_details(issues, &details);

        self.target.replace_all(&issues, &details).await?;

        Ok(SeedSummary {
            issues: issues.len(),
            report_details: details.len(),
            duplicate_details,
        })
    }
}

/// Keep the first detail per id, in order. Returns the kept details and how many were dropped.
pub fn first_per_id(details: Vec<ReportDetail>) -> (Vec<ReportDetail>, usize) {
    let total = details.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<ReportDetail> = details
        .into_iter()
        .filter(|d| seen.insert(d.id.clone()))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Each issue with its detail's duplicated fields applied on top
pub fn overlay_details(issues: Vec<Issue>, details: &[ReportDetail]) -> Vec<Issue> {
    let by_id: HashMap<&str, &ReportDetail> =
        details.iter().map(|d| (d.id.as_str(), d)).collect();

    issues
        .into_iter()
        .map(|issue| match by_id.get(issue.id.as_str()) {
            Some(detail) => issue.overlay(detail),
            None => issue,
        })
        .collect()
}
