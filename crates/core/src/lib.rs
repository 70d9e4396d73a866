//! `storefront-core` — shared building blocks for the reporting layer.
//!
//! This crate contains **pure** types (no database or HTTP concerns).

pub mod error;
pub mod id;
pub mod policy;

pub use error::{ReportError, ReportResult};
pub use id::OrderId;
pub use policy::{RevenuePolicy, RevenueScope};
