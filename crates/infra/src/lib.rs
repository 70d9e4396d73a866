//! Infrastructure layer: store access and the report engine.

pub mod read_model;
pub mod reports;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use read_model::SqliteStore;
pub use reports::ReportEngine;

#[cfg(test)]
mod engine_tests;
