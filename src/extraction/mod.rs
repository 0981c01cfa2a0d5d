//! Site summary extraction
//!
//! Turns the landing page's `index.html` into a [`SiteSummary`]. The HTTP
//! endpoint and the `summary` command both go through [`summarize_index`], so
//! there is exactly one copy of the mapping from markup to JSON.
//!
//! # Example
//!
//! ```rust
//! use suntram_landing::extraction::SiteExtractor;
//!
//! let html = r#"<html><body>
//!   <article class="service" data-service="web"><h3>Web</h3><p>Sitios.</p></article>
//! </body></html>"#;
//!
//! let extraction = SiteExtractor::extract(html);
//! assert_eq!(extraction.summary.services[0].key, "web");
//! assert!(extraction.missing_anchors.contains(&"#contacto"));
//! ```

pub mod extractor;
pub mod summary;
pub mod text;

pub use extractor::{Extraction, SiteExtractor};
pub use summary::{
    AiSolution, Contact, Hero, Link, Metric, OpenGraph, ProcessStep, SectionOutline, Service,
    SiteInfo, SiteSummary, SourceInfo,
};
pub use text::normalize_whitespace;

use std::path::Path;
use tracing::{debug, instrument};

use crate::error::{SiteError, SiteResult};

/// Read `index_path` from disk and extract its summary
///
/// Nothing is cached; every call re-reads and re-parses the file.
///
/// # Errors
///
/// - [`SiteError::SourceNotFound`] if the file does not exist
/// - [`SiteError::Io`] for any other read failure
#[instrument(fields(path = %index_path.display()))]
pub async fn summarize_index(index_path: &Path) -> SiteResult<Extraction> {
    let html = match tokio::fs::read_to_string(index_path).await {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SiteError::SourceNotFound {
                path: index_path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(SiteError::Io {
                path: index_path.to_path_buf(),
                source: e,
            });
        }
    };
    debug!(bytes = html.len(), "read summary source");

    Ok(SiteExtractor::extract(&html))
}
