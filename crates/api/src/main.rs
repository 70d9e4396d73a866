use anyhow::Context;

use storefront_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ApiConfig::from_env()
        .inspect_err(|e| tracing::error!("invalid configuration: {e}"))?;

    let app = app::build_app(&config)
        .await
        .inspect_err(|e| tracing::error!("cannot start without a usable store: {e}"))?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        database = %config.database_path.display(),
        delivered_status = config.revenue.delivered_status(),
        stats_revenue = %config.revenue.stats_scope(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
