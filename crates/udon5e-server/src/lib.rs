//! HTTP service for udon5e.
//!
//! Serves `GET /create-5e-udonarium-pc?url=<sheet url>`, which fetches a
//! dndjp character sheet and answers with the Udonarium zip archive, and
//! `GET /hello` as a liveness check.

mod config;
mod error;
mod routes;

pub use config::ServerConfig;
pub use error::{AppError, Error, Result};
pub use routes::{build_router, AppState, ConvertParams, CONVERT_PATH};

use tokio::net::TcpListener;
use udon5e::scrape::SheetFetcher;

/// Bind the listener and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let fetcher = SheetFetcher::with_timeout(config.fetch_timeout)?;
    let app = build_router(AppState::new(fetcher));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "udon5e server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("udon5e server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
