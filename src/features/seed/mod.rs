//! `nagar-seva seed`: load the JSON fixtures into the database.

pub mod services;

pub use services::SeedService;
