//! Reports feature: issues joined with their report details.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reports` | All merged rows with column labels |
//! | POST | `/api/reports` | Create a report detail |
//! | GET | `/api/reports/query` | Filtered, sorted, paginated rows |
//! | GET | `/api/reports/export` | Filtered, sorted rows as a CSV download |
//! | GET | `/api/reports/{id}` | One merged row |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
