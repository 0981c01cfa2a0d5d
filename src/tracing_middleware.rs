//! Request tracing and log setup
//!
//! - every request gets an `x-request-id` (taken from the request when the
//!   client sent one) that is echoed on the response and attached to the span
//! - `tower-http`'s [`TraceLayer`] logs the request line and the status with
//!   its latency
//! - [`init_tracing`] installs the subscriber; `SUNTRAM_LOG_FORMAT` picks
//!   `json`, `pretty` or `compact` output and `RUST_LOG` the filter
//!
//! ```text
//! Request ──> RequestIdLayer ──> TraceLayer ──> Router
//!                  │                  │
//!                  ▼                  ▼
//!            x-request-id      http_request span
//! ```

use axum::http::{header::HeaderName, HeaderValue, Request, Response};
use std::{
    fmt,
    str::FromStr,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};
use tower::{Layer, Service};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::{info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Environment variable selecting the log format
pub const LOG_FORMAT_ENV: &str = "SUNTRAM_LOG_FORMAT";

/// Identifier attached to a single request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(Arc<str>);

impl RequestId {
    /// Random UUID v4 id
    pub fn generate() -> Self {
        Self(Arc::from(Uuid::new_v4().to_string()))
    }

    /// Borrow the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Request id layer
// ============================================================================

/// Layer that assigns a [`RequestId`] and echoes it on the response
#[derive(Clone, Debug)]
pub struct RequestIdLayer {
    header: HeaderName,
}

impl RequestIdLayer {
    /// Use the `x-request-id` header
    pub fn new() -> Self {
        Self {
            header: HeaderName::from_static(REQUEST_ID_HEADER),
        }
    }
}

impl Default for RequestIdLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService {
            inner,
            header: self.header.clone(),
        }
    }
}

/// Service produced by [`RequestIdLayer`]
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
    header: HeaderName,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = RequestIdFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let id = request
            .headers()
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(RequestId::from)
            .unwrap_or_else(RequestId::generate);

        request.extensions_mut().insert(id.clone());

        RequestIdFuture {
            future: self.inner.call(request),
            id,
            header: self.header.clone(),
        }
    }
}

/// Response future that stamps the request id header
#[pin_project::pin_project]
pub struct RequestIdFuture<F> {
    #[pin]
    future: F,
    id: RequestId,
    header: HeaderName,
}

impl<F, ResBody, E> std::future::Future for RequestIdFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => response,
            other => return other,
        };

        if let Ok(value) = HeaderValue::from_str(this.id.as_str()) {
            response.headers_mut().insert(this.header.clone(), value);
        }
        Poll::Ready(Ok(response))
    }
}

// ============================================================================
// Trace layer
// ============================================================================

/// Span per request carrying the request id, method and path
#[derive(Clone, Debug)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(RequestId::to_string)
            .unwrap_or_else(|| "unknown".to_string());

        info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    }
}

/// Logs the incoming request line
#[derive(Clone, Debug)]
pub struct OnRequestLog;

impl<B> OnRequest<B> for OnRequestLog {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        tracing::debug!(
            target: "http::request",
            method = %request.method(),
            uri = %request.uri(),
            "incoming request"
        );
    }
}

/// Logs the response status and latency, at a level matching the status class
#[derive(Clone, Debug, Default)]
pub struct OnResponseLog;

impl<B> OnResponse<B> for OnResponseLog {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        let duration_ms = latency.as_secs_f64() * 1000.0;

        span.record("status", status);
        span.record("duration_ms", duration_ms);

        match status {
            500..=u16::MAX => {
                tracing::error!(target: "http::response", status, duration_ms, "server error")
            }
            400..=499 => {
                tracing::warn!(target: "http::response", status, duration_ms, "client error")
            }
            _ => tracing::info!(target: "http::response", status, duration_ms, "response sent"),
        }
    }
}

/// Trace layer wired with [`RequestSpan`], [`OnRequestLog`] and [`OnResponseLog`]
pub fn request_tracing_layer(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan, OnRequestLog, OnResponseLog>
{
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(OnRequestLog)
        .on_response(OnResponseLog)
}

// ============================================================================
// Subscriber setup
// ============================================================================

/// Output format for log lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line, human readable
    #[default]
    Pretty,
    /// Single line, minimal
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl LogFormat {
    /// Format from `SUNTRAM_LOG_FORMAT`; JSON in release builds, pretty otherwise
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if cfg!(debug_assertions) {
                Self::Pretty
            } else {
                Self::Json
            })
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `info` (or `debug` when `verbose`).
/// Calling this twice is harmless: the second call leaves the first
/// subscriber in place.
pub fn init_tracing(format: LogFormat, verbose: bool) {
    let fallback = if verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
