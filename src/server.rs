//! Server assembly and lifecycle

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers::{router, AppState};
use crate::shutdown::shutdown_signal;
use crate::tracing_middleware::{request_tracing_layer, RequestIdLayer};

/// Full application: routes, tracing and request ids
///
/// [`RequestIdLayer`] is outermost so the id exists before the trace span
/// is created.
pub fn build_app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(request_tracing_layer())
        .layer(RequestIdLayer::new())
}

/// Bind, serve until Ctrl+C or SIGTERM, then drain
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;

    let base_url = config.base_url();
    info!(
        address = %address,
        root = %config.root().display(),
        "SUNTRAM landing running at {base_url}"
    );
    info!("AI-friendly summary at {base_url}/site?pretty=1");

    let app = build_app(Arc::new(AppState::new(config)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}
