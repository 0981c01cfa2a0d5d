//! Error types for the landing server
//!
//! Every failure a request can hit maps to an HTTP status. The `/site`
//! endpoint reports a missing source file as a JSON error object; the other
//! failures are answered with a short plain-text body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while serving the site or building its summary
#[derive(Error, Debug)]
pub enum SiteError {
    /// The HTML source the summary is built from does not exist
    #[error("index.html not found")]
    SourceNotFound {
        /// Absolute path that was probed
        path: PathBuf,
    },

    /// Reading a file failed for a reason other than absence
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Request path escapes the project root
    #[error("Forbidden")]
    Forbidden,

    /// Requested file is absent or is a directory
    #[error("Not found")]
    NotFound,

    /// Request path could not be decoded
    #[error("Bad request path: {0}")]
    BadPath(String),

    /// Only GET and HEAD are served
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Summary could not be encoded as JSON
    #[error("failed to encode summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type SiteResult<T> = std::result::Result<T, SiteError>;

/// Body returned when the summary source is missing
#[derive(Debug, Serialize)]
pub struct SourceErrorBody {
    /// Always `false`
    pub ok: bool,
    /// Human readable message
    pub error: String,
    /// Path that was probed
    pub path: String,
}

impl SiteError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadPath(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::SourceNotFound { .. } | Self::Io { .. } | Self::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "source_not_found",
            Self::Io { .. } => "io",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::BadPath(_) => "bad_path",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Serialize(_) => "serialize",
        }
    }

    /// Build an I/O error for `path`, folding `NotFound` into [`SiteError::NotFound`]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io {
                path: path.into(),
                source,
            }
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "request rejected");
        }

        match self {
            Self::SourceNotFound { path } => {
                let body = SourceErrorBody {
                    ok: false,
                    error: "index.html not found".to_string(),
                    path: path.display().to_string(),
                };
                (status, Json(body)).into_response()
            }
            other => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                other.to_string(),
            )
                .into_response(),
        }
    }
}
