use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::issues::dtos::{
    IssueLabels, IssueListResponseDto, IssueMapDto, IssuePreviewDto, IssueRowDto, MapMarkerDto,
    MapPoint,
};
use crate::modules::storage::DataStore;
use crate::shared::constants::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};
use crate::shared::listing::{build_page, ListingPage, ListingQuery};

/// Service for issue listing operations
pub struct IssueService {
    store: Arc<dyn DataStore>,
}

impl IssueService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// All issues in storage order
    pub async fn list_rows(&self) -> Result<Vec<IssueRowDto>> {
        let issues = self.store.list_issues().await?;
        Ok(issues.into_iter().map(IssueRowDto::from).collect())
    }

    pub async fn list(&self) -> Result<IssueListResponseDto> {
        Ok(IssueListResponseDto {
            labels: IssueLabels::default(),
            rows: self.list_rows().await?,
        })
    }

    /// Filtered, newest-first page of issues
    pub async fn query(
        &self,
        query: &ListingQuery,
        now: DateTime<Utc>,
    ) -> Result<ListingPage<IssueRowDto>> {
        let rows = self.list_rows().await?;
        Ok(build_page(&rows, query, now))
    }

    /// First `limit` issues in storage order
    pub async fn preview(&self, limit: usize) -> Result<IssuePreviewDto> {
        let mut rows = self.list_rows().await?;
        let total = rows.len();
        rows.truncate(limit);

        Ok(IssuePreviewDto {
            labels: IssueLabels::default(),
            has_more: total > rows.len(),
            rows,
            total,
        })
    }

    /// Markers for every issue with both coordinates
    pub async fn map(&self) -> Result<IssueMapDto> {
        let issues = self.store.list_issues().await?;

        let markers: Vec<MapMarkerDto> = issues
            .into_iter()
            .filter_map(|issue| {
                let (lat, lng) = issue.coordinates()?;
                Some(MapMarkerDto {
                    color: issue.priority.marker_color().to_string(),
                    id: issue.id,
                    subject: issue.subject,
                    address: issue.address,
                    priority: issue.priority,
                    status: issue.status,
                    lat,
                    lng,
                })
            })
            .collect();

        let center = markers
            .first()
            .map(|m| MapPoint {
                lat: m.lat,
                lng: m.lng,
            })
            .unwrap_or(MapPoint {
                lat: DEFAULT_MAP_CENTER.0,
                lng: DEFAULT_MAP_CENTER.1,
            });

        Ok(IssueMapDto {
            center,
            zoom: DEFAULT_MAP_ZOOM,
            markers,
        })
    }
}
