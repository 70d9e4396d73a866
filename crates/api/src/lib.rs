//! HTTP API: configuration, routing, and response mapping for the reports.

pub mod app;
pub mod config;
