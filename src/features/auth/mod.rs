//! Officer login against a department → role → district credentials tree.
//!
//! Not production authentication: passwords are compared in plain text and no
//! token is issued. The returned session is kept by the client.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::Credentials;
pub use services::AuthService;
