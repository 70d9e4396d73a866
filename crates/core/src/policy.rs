//! Revenue rules shared by the aggregation reports.

use core::str::FromStr;

/// Status value the store uses for a fulfilled order.
pub const DEFAULT_DELIVERED_STATUS: &str = "Entregue";

/// Which orders `stats.receita_total` sums over.
///
/// Only the stats report honors this; the sales breakdowns are always
/// restricted to delivered orders.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RevenueScope {
    #[default]
    Delivered,
    All,
}

impl RevenueScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueScope::Delivered => "delivered",
            RevenueScope::All => "all",
        }
    }
}

impl core::fmt::Display for RevenueScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevenueScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivered" => Ok(RevenueScope::Delivered),
            "all" => Ok(RevenueScope::All),
            other => Err(format!(
                "unknown revenue scope {other:?}; expected one of: delivered, all"
            )),
        }
    }
}

/// Revenue configuration handed to the report engine at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenuePolicy {
    delivered_status: String,
    stats_scope: RevenueScope,
}

impl RevenuePolicy {
    pub fn new(delivered_status: impl Into<String>, stats_scope: RevenueScope) -> Self {
        Self {
            delivered_status: delivered_status.into(),
            stats_scope,
        }
    }

    pub fn delivered_status(&self) -> &str {
        &self.delivered_status
    }

    pub fn stats_scope(&self) -> RevenueScope {
        self.stats_scope
    }
}

impl Default for RevenuePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERED_STATUS, RevenueScope::Delivered)
    }
}
