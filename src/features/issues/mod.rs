//! Issues feature: the raw complaint table, its filtered view, a dashboard
//! preview and map markers.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/issues` | All issues with column labels |
//! | GET | `/api/issues/query` | Filtered, sorted, paginated issues |
//! | GET | `/api/issues/preview` | First rows for the dashboard table |
//! | GET | `/api/issues/map` | Map center and markers |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::IssueService;
