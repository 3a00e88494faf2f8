//! CLI command implementations

pub(crate) mod common;
pub(crate) mod run;
pub(crate) mod sql;
pub(crate) mod tables;
pub(crate) mod validate;
