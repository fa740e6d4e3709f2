//! HTTP request tracing

use axum::{body::Body, Router};
use http::{Request, Response};
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{info_span, Span};

/// Wraps `router` in a trace layer that opens one span per request and logs
/// the outcome at a level matching the status class.
pub fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            info_span!(
                "admin_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::debug!("{} {}", request.method(), request.uri().path());
        })
        .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
            let status = response.status();
            let latency_ms = latency.as_millis();

            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), latency_ms, "server error response");
            } else if status.is_client_error() {
                tracing::warn!(status = status.as_u16(), latency_ms, "client error response");
            } else {
                tracing::info!(status = status.as_u16(), latency_ms, "request completed");
            }
        })
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(latency_ms = latency.as_millis(), error = ?error, "request failed");
            },
        );

    router.layer(layer)
}
