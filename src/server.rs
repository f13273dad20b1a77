//! HTTP server initialization and runtime setup.
//!
//! Builds the base logger and request logging middleware from the
//! configuration, then runs the Axum server until a shutdown signal.

use crate::api::middleware::RequestLogger;
use crate::api::middleware::recover::install_panic_hook;
use crate::config::Config;
use crate::infrastructure::sink::TracingSink;
use crate::routes::app_router;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Panic hook recording the panic-site backtrace
/// - Base logger forwarding records to `tracing`
/// - Request logging middleware
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Request logger options are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    install_panic_hook();

    let logger = config.logger_options().build(Arc::new(TracingSink::new()));
    let request_logger = RequestLogger::new(logger, config.request_logger_options()?);

    let app = app_router(request_logger);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
