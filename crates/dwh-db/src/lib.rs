//! dwh-db - Database abstraction layer for the Sparkify warehouse
//!
//! This crate provides the `Database` trait and a DuckDB implementation used
//! to run generated statement sets against an embedded engine.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
