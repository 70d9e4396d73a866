use axum::{routing::get, Router};

pub mod reports;
pub mod system;

/// Router for every report endpoint (mounted under `/api`).
///
/// The dashboard and older clients use both English and Portuguese paths, so
/// each report answers on all of its names.
pub fn router() -> Router {
    Router::new()
        .route("/stats", get(reports::stats))
        .route("/products", get(reports::products))
        .route("/produtos", get(reports::products))
        .route("/clients", get(reports::customers))
        .route("/customers", get(reports::customers))
        .route("/clientes", get(reports::customers))
        .route("/orders", get(reports::orders))
        .route("/pedidos", get(reports::orders))
        .route("/order/:id", get(reports::order_detail))
        .route("/orders/:id", get(reports::order_detail))
        .route("/pedido/:id", get(reports::order_detail))
        .route("/order", get(reports::missing_order_id))
        .route("/order/", get(reports::missing_order_id))
        .route("/orders/", get(reports::missing_order_id))
        .route("/pedido", get(reports::missing_order_id))
        .route("/pedido/", get(reports::missing_order_id))
        .route("/sales-by-category", get(reports::sales_by_category))
        .route("/vendas-categoria", get(reports::sales_by_category))
        .route("/top-products", get(reports::top_products))
        .route("/produtos-mais-vendidos", get(reports::top_products))
        .route("/monthly-sales", get(reports::monthly_sales))
        .route("/vendas-mensais", get(reports::monthly_sales))
}
