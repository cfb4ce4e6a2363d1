//! OS signal handling and graceful shutdown.

use std::time::Duration;

use axum_server::Handle;

/// Grace period for in-flight requests after an interrupt.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Wait for an interrupt, then drain the server through its handle.
pub async fn shutdown_on_interrupt(handle: Handle) {
    wait_for_interrupt().await;
    tracing::info!("shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}

async fn wait_for_interrupt() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
