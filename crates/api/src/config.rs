//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use storefront_core::policy::DEFAULT_DELIVERED_STATUS;
use storefront_core::{RevenuePolicy, RevenueScope};

pub const ENV_DATABASE: &str = "STOREFRONT_DB";
pub const ENV_BIND: &str = "STOREFRONT_BIND";
pub const ENV_DELIVERED_STATUS: &str = "STOREFRONT_DELIVERED_STATUS";
pub const ENV_STATS_REVENUE: &str = "STOREFRONT_STATS_REVENUE";

pub const DEFAULT_DATABASE: &str = "ecommerce.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Fatal startup failures. None of these are recoverable per request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database '{}' not found; create and seed it before starting the server", .0.display())]
    StoreMissing(PathBuf),

    #[error("database '{}' cannot be read: {reason}", .path.display())]
    StoreUnreadable { path: PathBuf, reason: String },

    #[error("invalid STOREFRONT_BIND value {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },

    #[error("invalid STOREFRONT_STATS_REVENUE: {0}")]
    InvalidRevenueScope(String),

    #[error("STOREFRONT_DELIVERED_STATUS must not be empty")]
    EmptyDeliveredStatus,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub revenue: RevenuePolicy,
}

impl ApiConfig {
    /// Configuration for `database_path` with every other setting at its default.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            revenue: RevenuePolicy::default(),
        }
    }

    pub fn with_revenue(mut self, revenue: RevenuePolicy) -> Self {
        self.revenue = revenue;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Does not touch the filesystem; [`ApiConfig::ensure_store_exists`] does.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = PathBuf::from(
            lookup(ENV_DATABASE).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        );

        let bind_raw = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let delivered_status = lookup(ENV_DELIVERED_STATUS)
            .unwrap_or_else(|| DEFAULT_DELIVERED_STATUS.to_string());
        if delivered_status.trim().is_empty() {
            return Err(ConfigError::EmptyDeliveredStatus);
        }

        let stats_scope = match lookup(ENV_STATS_REVENUE) {
            Some(raw) => raw
                .parse::<RevenueScope>()
                .map_err(ConfigError::InvalidRevenueScope)?,
            None => RevenueScope::default(),
        };

        Ok(Self {
            database_path,
            bind_addr,
            revenue: RevenuePolicy::new(delivered_status, stats_scope),
        })
    }

    pub fn ensure_store_exists(&self) -> Result<(), ConfigError> {
        if self.database_path.is_file() {
            Ok(())
        } else {
            Err(ConfigError::StoreMissing(self.database_path.clone()))
        }
    }
}
