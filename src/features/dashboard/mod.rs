//! Dashboard feature: KPI summary for the analytics header.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::DashboardService;
