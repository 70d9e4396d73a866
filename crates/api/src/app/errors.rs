use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storefront_core::ReportError;

pub const ENDPOINT_NOT_FOUND: &str = "Endpoint não encontrado";
pub const RECORD_NOT_FOUND: &str = "Registro não encontrado";
pub const INVALID_ORDER_ID: &str = "ID de pedido inválido";

pub fn report_error_to_response(err: ReportError) -> axum::response::Response {
    match err {
        ReportError::NotFound => json_error(StatusCode::NOT_FOUND, RECORD_NOT_FOUND),
        ReportError::Malformed(_) => json_error(StatusCode::BAD_REQUEST, INVALID_ORDER_ID),
        ReportError::StoreUnavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Erro ao consultar o banco de dados: {msg}"))
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}

/// Fallback for any path no report is mounted on.
pub async fn unknown_endpoint() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, ENDPOINT_NOT_FOUND)
}
