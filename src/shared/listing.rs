//! In-memory table view: filter, sort and paginate an already-fetched row set.
//!
//! Every filter is an independent predicate, so applying them is idempotent and
//! order-independent. Rows are always returned newest first.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_BUTTON_WINDOW};

/// Fields a row must expose to take part in the table view
pub trait ListingRow {
    fn row_id(&self) -> &str;
    fn subject(&self) -> &str;
    fn address(&self) -> &str;
    fn date(&self) -> DateTime<Utc>;
    fn priority(&self) -> &str;
    fn status(&self) -> &str;
}

/// Date bucket filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DateRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7")]
    Last7Days,
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "month")]
    ThisMonth,
    #[serde(rename = "year")]
    ThisYear,
}

impl DateRange {
    pub fn matches(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Last7Days => now - date <= Duration::days(7),
            DateRange::Last30Days => now - date <= Duration::days(30),
            DateRange::ThisMonth => date.month() == now.month() && date.year() == now.year(),
            DateRange::ThisYear => date.year() == now.year(),
        }
    }
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Query params for table views
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListingQuery {
    /// Date bucket: all, 7, 30, month, year (default: all)
    #[serde(default)]
    pub date_range: DateRange,
    /// Priority to match (case-insensitive), "all" for no filter
    pub priority: Option<String>,
    /// Status to match (case-insensitive), "all" for no filter
    pub status: Option<String>,
    /// Substring search over id, subject and address
    pub q: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: usize,
    /// Rows per page (default: 12, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            date_range: DateRange::All,
            priority: None,
            status: None,
            q: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Normalised filter set derived from a [`ListingQuery`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub date_range: DateRange,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub needle: Option<String>,
}

fn normalise_choice(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

impl ListingFilter {
    pub fn from_query(query: &ListingQuery) -> Self {
        Self {
            date_range: query.date_range,
            priority: normalise_choice(query.priority.as_deref()),
            status: normalise_choice(query.status.as_deref()),
            needle: query
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_lowercase),
        }
    }

    pub fn matches<T: ListingRow>(&self, row: &T, now: DateTime<Utc>) -> bool {
        if !self.date_range.matches(row.date(), now) {
            return false;
        }
        if let Some(priority) = &self.priority {
            if row.priority().to_lowercase() != *priority {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if row.status().to_lowercase() != *status {
                return false;
            }
        }
        match &self.needle {
            Some(needle) => {
                row.row_id().to_lowercase().contains(needle)
                    || row.subject().to_lowercase().contains(needle)
                    || row.address().to_lowercase().contains(needle)
            }
            None => true,
        }
    }

    /// Keep matching rows, newest first
    pub fn apply<T: ListingRow + Clone>(&self, rows: &[T], now: DateTime<Utc>) -> Vec<T> {
        let mut filtered: Vec<T> = rows
            .iter()
            .filter(|row| self.matches(*row, now))
            .cloned()
            .collect();
        filtered.sort_by_key(|row| std::cmp::Reverse(row.date()));
        filtered
    }
}

/// Index range of one page over the filtered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub start: usize,
    pub end: usize,
    /// Page numbers to render as buttons
    pub pages: Vec<usize>,
}

impl PageWindow {
    pub fn new(filtered: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let page_count = filtered.div_ceil(page_size).max(1);
        let page = page.clamp(1, page_count);
        let start = ((page - 1) * page_size).min(filtered);
        let end = (start + page_size).min(filtered);

        Self {
            page,
            page_size,
            page_count,
            start,
            end,
            pages: page_buttons(page, page_count),
        }
    }
}

fn page_buttons(current: usize, page_count: usize) -> Vec<usize> {
    let first = if page_count <= PAGE_BUTTON_WINDOW || current <= 3 {
        1
    } else if current > page_count - 3 {
        page_count - (PAGE_BUTTON_WINDOW - 1)
    } else {
        current - 2
    };
    let len = PAGE_BUTTON_WINDOW.min(page_count);
    (first..first + len).collect()
}

/// One page of a table view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingPage<T> {
    pub rows: Vec<T>,
    /// Row count before filtering
    pub total: usize,
    /// Row count after filtering
    pub filtered: usize,
    pub pagination: PageWindow,
}

/// Filter, sort and slice `rows` according to `query`
pub fn build_page<T: ListingRow + Clone>(
    rows: &[T],
    query: &ListingQuery,
    now: DateTime<Utc>,
) -> ListingPage<T> {
    let filtered = ListingFilter::from_query(query).apply(rows, now);
    let window = PageWindow::new(filtered.len(), query.page, query.page_size);
    let page_rows = filtered[window.start..window.end].to_vec();

    ListingPage {
        rows: page_rows,
        total: rows.len(),
        filtered: filtered.len(),
        pagination: window,
    }
}
