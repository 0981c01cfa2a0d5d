//! HTTP handlers for the landing server
//!
//! # Modules
//!
//! - [`site`] - `GET /site`, the JSON summary of `index.html`
//! - [`static_files`] - every other path, served from the project root
//!
//! # Example
//!
//! ```rust,no_run
//! use suntram_landing::config::ServerConfig;
//! use suntram_landing::handlers::{router, AppState};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let state = Arc::new(AppState::new(ServerConfig::new("./site")));
//! let app = router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4174").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod site;
pub mod static_files;

pub use site::{is_pretty_flag, site_handler, SiteQuery, JSON_CONTENT_TYPE};
pub use static_files::{content_type, resolve_path, static_handler};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared, read-only state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Wrap a configuration
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// Routes: `/site` plus the static fallback
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/site", get(site_handler))
        .fallback(static_handler)
        .with_state(state)
}
