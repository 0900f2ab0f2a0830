//! Request tracing for the HTTP surface.

use axum::http::{Request, header};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Opens the request span, tagged with the `Host` the request was made for.
///
/// Every page of the site is domain-scoped, so the host is the first thing
/// needed when reading a log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSpan;

impl<B> MakeSpan<B> for HostSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            host,
        )
    }
}

/// Request span at `INFO`; response event with status and latency in
/// milliseconds.
///
/// ```text
/// INFO request{method=GET uri=/sitemap.xml host=ads.example.com}: finished processing request latency=3 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, HostSpan> {
    TraceLayer::new_for_http().make_span_with(HostSpan).on_response(
        DefaultOnResponse::new()
            .level(Level::INFO)
            .latency_unit(LatencyUnit::Millis),
    )
}
