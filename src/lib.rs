//! SUNTRAM landing server
//!
//! Serves the SUNTRAM Digital landing page from a project directory and
//! publishes a machine-readable summary of it at `GET /site`, so assistants
//! and crawlers can read the page's offer without parsing its markup.
//!
//! # Features
//!
//! - **Static files**: every path other than `/site` is read from the project
//!   root with a fixed content-type table; traversal above the root is `403`
//! - **Site summary**: `index.html` is parsed on each request into
//!   [`SiteSummary`] (brand, navigation, hero, sections, services, AI
//!   solutions, process, contact, footer links)
//! - **Request tracing**: `x-request-id` on every response, one span per
//!   request, JSON or human-readable logs
//! - **Graceful shutdown**: Ctrl+C and SIGTERM drain in-flight requests
//!
//! # Architecture
//!
//! ```text
//! Client ──▶ RequestIdLayer ──▶ TraceLayer ──▶ Router
//!                                                │
//!                              ┌─────────────────┴───────────────┐
//!                              ▼                                 ▼
//!                        GET /site                         everything else
//!                              │                                 │
//!                              ▼                                 ▼
//!                   ┌────────────────────┐             ┌──────────────────┐
//!                   │ SiteExtractor      │             │ resolve_path     │
//!                   │ (scraper, per req) │             │ + content_type   │
//!                   └─────────┬──────────┘             └────────┬─────────┘
//!                             ▼                                 ▼
//!                      SiteSummary JSON                    file bytes
//! ```
//!
//! # Extracting a summary
//!
//! ```rust
//! use suntram_landing::SiteExtractor;
//!
//! let html = r#"<html lang="es"><head><title>SUNTRAM</title></head>
//!   <body><section id="servicios"><article class="service" data-service="web">
//!   <h3>Sitios web</h3><p>Landing pages rápidas.</p></article></section></body></html>"#;
//!
//! let extraction = SiteExtractor::extract(html);
//! assert_eq!(extraction.summary.site.title, "SUNTRAM");
//! assert_eq!(extraction.summary.services[0].key, "web");
//! ```
//!
//! # Running the server
//!
//! ```rust,no_run
//! use suntram_landing::{init_tracing, serve, LogFormat, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     init_tracing(LogFormat::from_env(), false);
//!     serve(ServerConfig::from_env()).await
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extraction;
pub mod handlers;
pub mod server;
pub mod shutdown;
pub mod tracing_middleware;

// Re-exports for convenience
pub use config::ServerConfig;
pub use error::{SiteError, SiteResult};
pub use extraction::{summarize_index, Extraction, SiteExtractor, SiteSummary};
pub use handlers::{router, AppState};
pub use server::{build_app, serve};
pub use shutdown::shutdown_signal;
pub use tracing_middleware::{
    init_tracing, request_tracing_layer, LogFormat, RequestId, RequestIdLayer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
