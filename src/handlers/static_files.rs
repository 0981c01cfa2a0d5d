//! Static file responder
//!
//! Serves the landing page's files straight from the project root. The
//! request path is resolved lexically; a `..` that would climb above the root
//! is answered with `403` before the filesystem is touched.

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use metrics::counter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::AppState;
use crate::config::INDEX_FILE;
use crate::error::{SiteError, SiteResult};

/// Content type for a file, by extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "svg" => "image/svg+xml",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "json" => "application/json; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Map a request path onto a file below `root`
///
/// `/` maps to `index.html`. `.` segments are dropped and `..` removes the
/// previous segment; running out of segments is [`SiteError::Forbidden`].
pub fn resolve_path(root: &Path, request_path: &str) -> SiteResult<PathBuf> {
    let decoded = urlencoding::decode(request_path)
        .map_err(|e| SiteError::BadPath(format!("{request_path}: {e}")))?;

    if decoded.contains('\0') {
        return Err(SiteError::BadPath("NUL byte in path".to_string()));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(SiteError::Forbidden);
                }
            }
            name => segments.push(name),
        }
    }

    if segments.is_empty() {
        if decoded.trim_matches('/').is_empty() {
            return Ok(root.join(INDEX_FILE));
        }
        // e.g. "/a/.." collapses onto the root directory itself
        return Ok(root.to_path_buf());
    }

    Ok(segments
        .into_iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment)))
}

/// Read a resolved file; directories and absent files are [`SiteError::NotFound`]
pub async fn read_file(path: &Path) -> SiteResult<Vec<u8>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| SiteError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(SiteError::NotFound);
    }

    tokio::fs::read(path)
        .await
        .map_err(|e| SiteError::from_io(path, e))
}

/// Fallback handler serving everything that is not `/site`
#[instrument(skip(state), fields(path = %uri.path()))]
pub async fn static_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let result = serve(&state, &method, uri.path()).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    counter!("static_requests_total", "status" => status.as_u16().to_string()).increment(1);

    match result {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn serve(state: &AppState, method: &Method, request_path: &str) -> SiteResult<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Err(SiteError::MethodNotAllowed);
    }

    let path = resolve_path(state.config.root(), request_path)?;
    let bytes = read_file(&path).await?;
    debug!(file = %path.display(), bytes = bytes.len(), "serving static file");

    let mut response = ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response();
    if method == Method::HEAD {
        *response.body_mut() = axum::body::Body::empty();
    }
    Ok(response)
}
