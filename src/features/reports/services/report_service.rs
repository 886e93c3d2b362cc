use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::issues::models::Issue;
use crate::features::reports::dtos::{
    CreateReportDto, ReportLabels, ReportListResponseDto, ReportRowDto,
};
use crate::features::reports::models::ReportDetail;
use crate::modules::storage::DataStore;
use crate::shared::listing::{build_page, ListingFilter, ListingPage, ListingQuery};

/// Service for report operations
pub struct ReportService {
    store: Arc<dyn DataStore>,
}

/// Left-join issues with details on `id`. First detail per id wins; one row per issue.
pub fn merge_rows(issues: Vec<Issue>, details: &[ReportDetail]) -> Vec<ReportRowDto> {
    let mut first_by_id: HashMap<&str, &ReportDetail> = HashMap::with_capacity(details.len());
    for detail in details {
        first_by_id.entry(detail.id.as_str()).or_insert(detail);
    }

    issues
        .into_iter()
        .map(|issue| {
            let detail = first_by_id.get(issue.id.as_str()).copied();
            if let Some(detail) = detail {
                let divergent = detail.divergent_fields(&issue);
                if !divergent.is_empty() {
                    tracing::debug!(
                        "Report detail {} disagrees with its issue on {:?}; keeping issue values",
                        issue.id,
                        divergent
                    );
                }
            }
            ReportRowDto::merge(issue, detail)
        })
        .collect()
}

/// Header row plus one record per report, quoted wherever a field needs it
pub fn rows_to_csv(rows: &[ReportRowDto]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_internal = |e: csv::Error| AppError::Internal(format!("CSV export failed: {}", e));

    writer.write_record(CSV_HEADER).map_err(to_internal)?;
    for row in rows {
        let date = row.date.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                row.id.as_str(),
                row.subject.as_str(),
                row.address.as_str(),
                date.as_str(),
                row.priority.as_str(),
                row.status.as_str(),
                row.description.as_str(),
                row.assistant_engineer.as_str(),
                row.junior_engineer.as_str(),
            ])
            .map_err(to_internal)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
}

const CSV_HEADER: [&str; 9] = [
    "ID",
    "Subject",
    "Address",
    "Date",
    "Priority",
    "Status",
    "Description",
    "Assistant Engineer",
    "Junior Engineer",
];

impl ReportService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Every issue joined with its report detail
    pub async fn list_rows(&self) -> Result<Vec<ReportRowDto>> {
        let issues = self.store.list_issues().await?;
        let details = self.store.list_report_details().await?;
        Ok(merge_rows(issues, &details))
    }

    pub async fn list(&self) -> Result<ReportListResponseDto> {
        let rows = self.list_rows().await?;
        Ok(ReportListResponseDto {
            labels: ReportLabels::default(),
            reports: rows.clone(),
            rows,
        })
    }

    /// Filtered, newest-first page of reports
    pub async fn query(
        &self,
        query: &ListingQuery,
        now: DateTime<Utc>,
    ) -> Result<ListingPage<ReportRowDto>> {
        let rows = self.list_rows().await?;
        Ok(build_page(&rows, query, now))
    }

    /// Every row matching `query` as CSV, newest first. Paging fields are ignored.
    pub async fn export_csv(&self, query: &ListingQuery, now: DateTime<Utc>) -> Result<String> {
        let rows = self.list_rows().await?;
        let filtered = ListingFilter::from_query(query).apply(&rows, now);
        let csv = rows_to_csv(&filtered)?;
        tracing::debug!("Exported {} of {} reports as CSV", filtered.len(), rows.len());
        Ok(csv)
    }

    /// Merged row for a single issue id
    pub async fn get(&self, id: &str) -> Result<ReportRowDto> {
        let issue = self
            .store
            .find_issue(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
        let detail = self.store.find_report_detail(id).await?;

        Ok(ReportRowDto::merge(issue, detail.as_ref()))
    }

    /// Store a new report detail for an existing issue
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportDetail> {
        if self.store.find_issue(&dto.id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Issue '{}' does not exist",
                dto.id
            )));
        }

        let detail = self.store.insert_report_detail(dto.into()).await?;
        tracing::info!(
            "Report detail created for issue {} ({})",
            detail.id,
            self.store.backend_name()
        );
        Ok(detail)
    }
}
