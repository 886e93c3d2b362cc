//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the storage backends the features read issues and report details from.

pub mod storage;
