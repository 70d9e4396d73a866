//! Report engine: named read-only reports over the store.
//!
//! Every report opens its own connection, runs its query plan, and releases
//! the connection before returning, on success and on error alike.

use storefront_core::{OrderId, ReportError, ReportResult, RevenuePolicy};

use crate::read_model::SqliteStore;

pub mod models;
pub mod queries;

pub use models::{
    CategorySales, CustomerRow, MonthlySales, OrderDetail, OrderItemRow, OrderRow, ProductRow,
    Stats, StatusCount, TopProduct,
};
pub use queries::TOP_PRODUCTS_LIMIT;

/// Run `$body` against a fresh connection bound to `$conn`, then release it.
macro_rules! with_connection {
    ($engine:expr, $report:literal, |$conn:ident| $body:expr) => {{
        let result = match $engine.store.open().await {
            Ok(mut $conn) => {
                let result = $body.await;
                $engine.store.release($conn).await;
                result
            }
            Err(e) => Err(e),
        };
        match &result {
            Ok(_) => tracing::debug!(report = $report, "report served"),
            Err(e) => tracing::error!(report = $report, "report failed: {e}"),
        }
        result
    }};
}

/// Read-only report engine.
///
/// Holds no connection between calls; sharing one engine across requests
/// shares only its configuration.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    store: SqliteStore,
    policy: RevenuePolicy,
}

impl ReportEngine {
    pub fn new(store: SqliteStore, policy: RevenuePolicy) -> Self {
        Self { store, policy }
    }

    pub async fn stats(&self) -> ReportResult<Stats> {
        with_connection!(self, "stats", |conn| queries::stats(&mut conn, &self.policy))
    }

    pub async fn products(&self) -> ReportResult<Vec<ProductRow>> {
        with_connection!(self, "products", |conn| queries::products(&mut conn))
    }

    pub async fn customers(&self) -> ReportResult<Vec<CustomerRow>> {
        with_connection!(self, "customers", |conn| queries::customers(&mut conn))
    }

    pub async fn orders(&self) -> ReportResult<Vec<OrderRow>> {
        with_connection!(self, "orders", |conn| queries::orders(&mut conn))
    }

    /// Order header and lines, or [`ReportError::NotFound`].
    pub async fn order_detail(&self, order_id: OrderId) -> ReportResult<OrderDetail> {
        let detail = with_connection!(self, "order_detail", |conn| {
            queries::order_detail(&mut conn, order_id)
        })?;
        detail.ok_or_else(|| {
            tracing::debug!(%order_id, "order not found");
            ReportError::not_found()
        })
    }

    pub async fn sales_by_category(&self) -> ReportResult<Vec<CategorySales>> {
        with_connection!(self, "sales_by_category", |conn| {
            queries::sales_by_category(&mut conn, &self.policy)
        })
    }

    /// At most [`TOP_PRODUCTS_LIMIT`] products, best sellers first.
    pub async fn top_products(&self) -> ReportResult<Vec<TopProduct>> {
        with_connection!(self, "top_products", |conn| {
            queries::top_products(&mut conn, &self.policy)
        })
    }

    pub async fn monthly_sales(&self) -> ReportResult<Vec<MonthlySales>> {
        with_connection!(self, "monthly_sales", |conn| {
            queries::monthly_sales(&mut conn, &self.policy)
        })
    }
}
