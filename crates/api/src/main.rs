use std::sync::Arc;

use anyhow::Context;

use exctrack_infra::AppConfig;

const LISTEN_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    exctrack_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // Startup is all-or-nothing: an unreachable store aborts the process.
    let services = exctrack_api::app::build_services(&config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to initialize exception store"))
        .context("failed to initialize exception store")?;

    let services = Arc::new(services);
    let app = exctrack_api::app::build_app(services.clone());

    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR)
        .await
        .with_context(|| format!("failed to bind {LISTEN_ADDR}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(stats) = services.task_stats() {
        tracing::info!(
            enqueued = stats.enqueued,
            completed = stats.completed,
            failed = stats.failed,
            running = stats.running,
            "deferred task summary"
        );
    }
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
