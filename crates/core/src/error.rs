//! Report error model.

use thiserror::Error;

/// Result type used across the reporting layer.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure of a single report request.
///
/// Every variant terminates the request that produced it; nothing here is
/// retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The requested entity id does not exist in the store.
    #[error("not found")]
    NotFound,

    /// A path parameter failed to parse.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Connecting to or querying the store failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ReportError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
