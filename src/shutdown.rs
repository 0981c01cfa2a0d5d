//! Shutdown signal handling
//!
//! [`shutdown_signal`] resolves on Ctrl+C or, on Unix, SIGTERM. It is handed
//! to `axum::serve(..).with_graceful_shutdown(..)` so the listener stops
//! accepting and in-flight requests finish before the process exits.

use tracing::{info, warn};

/// Wait for Ctrl+C or SIGTERM
///
/// If a handler cannot be installed the corresponding branch never
/// resolves; the other one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
