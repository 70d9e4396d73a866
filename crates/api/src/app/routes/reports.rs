use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use storefront_core::{OrderId, ReportError, ReportResult};
use storefront_infra::ReportEngine;

use crate::app::errors;

pub const ORDER_NOT_FOUND: &str = "Pedido não encontrado";

fn respond<T: Serialize>(result: ReportResult<T>) -> axum::response::Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => errors::report_error_to_response(e),
    }
}

pub async fn stats(Extension(engine): Extension<Arc<ReportEngine>>) -> axum::response::Response {
    respond(engine.stats().await)
}

pub async fn products(Extension(engine): Extension<Arc<ReportEngine>>) -> axum::response::Response {
    respond(engine.products().await)
}

pub async fn customers(Extension(engine): Extension<Arc<ReportEngine>>) -> axum::response::Response {
    respond(engine.customers().await)
}

pub async fn orders(Extension(engine): Extension<Arc<ReportEngine>>) -> axum::response::Response {
    respond(engine.orders().await)
}

pub async fn order_detail(
    Extension(engine): Extension<Arc<ReportEngine>>,
    path: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return errors::report_error_to_response(ReportError::malformed(rejection.body_text()));
        }
    };
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::report_error_to_response(e),
    };

    match engine.order_detail(order_id).await {
        Err(ReportError::NotFound) => errors::json_error(StatusCode::NOT_FOUND, ORDER_NOT_FOUND),
        other => respond(other),
    }
}

/// `/api/order` with no id segment, with or without a trailing slash.
pub async fn missing_order_id() -> axum::response::Response {
    errors::report_error_to_response(ReportError::malformed("missing order id"))
}

pub async fn sales_by_category(
    Extension(engine): Extension<Arc<ReportEngine>>,
) -> axum::response::Response {
    respond(engine.sales_by_category().await)
}

pub async fn top_products(Extension(engine): Extension<Arc<ReportEngine>>) -> axum::response::Response {
    respond(engine.top_products().await)
}

pub async fn monthly_sales(
    Extension(engine): Extension<Arc<ReportEngine>>,
) -> axum::response::Response {
    respond(engine.monthly_sales().await)
}
