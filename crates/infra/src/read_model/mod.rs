//! Read-only access to the relational store the reports query.

pub mod sqlite;

pub use sqlite::{store_error, SqliteStore};
