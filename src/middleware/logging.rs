use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::{
  classify::{ServerErrorsAsFailures, SharedClassifier},
  trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

pub type HttpTraceLayer =
  TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan, LogRequestStart, LogRequestEnd>;

/// Request logging: one span per request carrying method and path, an event on entry and
/// an event on completion with status and elapsed time.
pub fn trace_layer() -> HttpTraceLayer {
  TraceLayer::new_for_http()
    .make_span_with(RequestSpan)
    .on_request(LogRequestStart)
    .on_response(LogRequestEnd)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
  fn make_span(&mut self, request: &Request<B>) -> Span {
    tracing::info_span!(
      "http_request",
      method = %request.method(),
      path = %request.uri().path(),
      status = tracing::field::Empty
    )
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequestStart;

impl<B> OnRequest<B> for LogRequestStart {
  fn on_request(&mut self, request: &Request<B>, _span: &Span) {
    tracing::info!(method = %request.method(), path = %request.uri().path(), "request started");
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequestEnd;

impl<B> OnResponse<B> for LogRequestEnd {
  fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
    let status = response.status();
    span.record("status", tracing::field::display(status));
    let elapsed_ms = latency.as_secs_f64() * 1000.0;

    if status.is_server_error() {
      tracing::error!(%status, elapsed_ms, "request finished");
    } else {
      tracing::info!(%status, elapsed_ms, "request finished");
    }
  }
}
