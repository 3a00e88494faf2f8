//! dwh-core - Core library for the Sparkify warehouse
//!
//! This crate provides the star-schema table catalog, the SQL dialects the
//! warehouse is rendered for, warehouse configuration, and the statement
//! builder that produces the drop, create, copy and insert phases of a
//! pipeline run.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
mod newtype_string;
pub mod pipeline;
pub mod schema;
pub mod sql_utils;
pub mod statement;
pub mod table_name;
pub mod transform;

pub use builder::StatementBuilder;
pub use config::{Config, CopySources, IamRoleArn, ObjectStorePath};
pub use dialect::{Dialect, DialectKind, DuckDbDialect, RedshiftDialect};
pub use error::CoreError;
pub use pipeline::Pipeline;
pub use schema::{Column, ColumnType, TableDef, TableKind};
pub use statement::{Phase, Statement};
pub use table_name::TableName;
