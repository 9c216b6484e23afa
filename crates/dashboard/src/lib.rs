//! Interactive movement dashboard.
//!
//! Serves a single page with a multi-select market filter driving the
//! stacked movement chart. Every request reloads the summary table through
//! the injected [`SummarySource`], so the chart follows the file on disk.

pub mod error;
pub mod page;
pub mod routes;
pub mod source;
pub mod state;

pub use error::DashboardError;
pub use routes::router;
pub use source::{CsvSummarySource, SummarySource};
pub use state::AppState;

use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

/// Bind `addr` and serve the dashboard until Ctrl+C.
pub async fn serve(state: AppState, addr: SocketAddr) -> moves_core::Result<()> {
    let app = router(state).layer(TraceLayer::new_for_http());

    tracing::info!("Registering routes:");
    tracing::info!("  GET /");
    tracing::info!("  GET /api/markets");
    tracing::info!("  GET /api/figure?market=<market>&market=<market>");
    tracing::info!("  GET /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping dashboard");
}
