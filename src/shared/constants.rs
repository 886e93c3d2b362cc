/// Rows per page of the reports table
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: usize = 100;

/// Number of page buttons shown around the current page
pub const PAGE_BUTTON_WINDOW: usize = 5;

/// Rows shown by the collapsed issues table on the admin dashboard
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

// =============================================================================
// MAP
// =============================================================================

/// Map center used when no issue carries coordinates (Ranchi, Jharkhand)
pub const DEFAULT_MAP_CENTER: (f64, f64) = (23.3441, 85.3096);

pub const DEFAULT_MAP_ZOOM: u8 = 13;

// =============================================================================
// REPORT PLACEHOLDERS
// =============================================================================

/// Shown when an issue has no matching report detail
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

pub const PLACEHOLDER_ENGINEER: &str = "Not assigned";

/// Liveness string served at `/`
pub const ROOT_MESSAGE: &str = "Backend is running!";
