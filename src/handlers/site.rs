//! `GET /site` – JSON summary of the landing page
//!
//! The summary is rebuilt from `index.html` on every request; edits to the
//! page show up without a restart.
//!
//! # Query
//!
//! - `pretty=1` or `pretty=true` (any case) indents the JSON by two spaces.
//!   The content is identical either way. When the parameter repeats, the
//!   first value wins.
//!
//! # Errors
//!
//! - `500` with `{"ok": false, "error": "index.html not found", "path": ...}`
//!   when the source file is missing
//! - `500` plain text for any other read failure

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::AppState;
use crate::error::SiteResult;
use crate::extraction;

/// JSON content type for the summary
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Query parameters accepted by `/site`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteQuery {
    /// Indentation switch, `1` or `true`
    pub pretty: Option<String>,
}

impl SiteQuery {
    /// Build from raw query pairs; unknown keys are ignored, first value wins
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let pretty = pairs
            .iter()
            .find(|(key, _)| key == "pretty")
            .map(|(_, value)| value.clone());
        Self { pretty }
    }

    /// Whether indented output was requested
    pub fn is_pretty(&self) -> bool {
        is_pretty_flag(self.pretty.as_deref())
    }
}

/// `1` or case-insensitive `true`
pub fn is_pretty_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        None => false,
    }
}

/// Handle `GET /site`
#[instrument(skip(state, params))]
pub async fn site_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> SiteResult<Response> {
    let query = SiteQuery::from_pairs(&params);
    let start = Instant::now();
    counter!("site_summary_requests_total").increment(1);

    let extraction = extraction::summarize_index(&state.config.index_path()).await?;
    if !extraction.missing_anchors.is_empty() {
        debug!(missing = extraction.missing_anchors.len(), "summary built with gaps");
    }

    let body = extraction.summary.to_json(query.is_pretty())?;

    let elapsed = start.elapsed();
    histogram!("site_summary_extraction_seconds").record(elapsed.as_secs_f64());
    info!(
        bytes = body.len(),
        pretty = query.is_pretty(),
        services = extraction.summary.services.len(),
        duration_us = elapsed.as_micros() as u64,
        "site summary served"
    );

    Ok((
        [
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
        .into_response())
}
