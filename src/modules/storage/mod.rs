//! Storage backends for issues and report details
//!
//! Two interchangeable implementations sit behind [`DataStore`]: JSON fixture
//! files read from disk, and a Postgres database.

mod data_store;
mod fixture_store;
mod postgres_store;

pub use data_store::DataStore;
pub use fixture_store::FixtureStore;
pub use postgres_store::PostgresStore;
