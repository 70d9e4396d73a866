//! HTTP API application wiring (Axum router + report engine).
//!
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{http::Method, routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storefront_infra::{ReportEngine, SqliteStore};

use crate::config::{ApiConfig, ConfigError};

pub mod errors;
pub mod routes;

/// Build the full HTTP router around an existing engine.
pub fn router(engine: Arc<ReportEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .fallback(errors::unknown_endpoint)
        .layer(Extension(engine))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Validate the store and build the router (public entrypoint used by `main.rs`).
///
/// A missing or unreadable store is a configuration error: the server must
/// not start serving without one.
pub async fn build_app(config: &ApiConfig) -> Result<Router, ConfigError> {
    config.ensure_store_exists()?;

    let store = SqliteStore::new(&config.database_path);
    store
        .check()
        .await
        .map_err(|e| ConfigError::StoreUnreadable {
            path: config.database_path.clone(),
            reason: e.to_string(),
        })?;

    let engine = Arc::new(ReportEngine::new(store, config.revenue.clone()));
    Ok(router(engine))
}
