//! Request tracing middleware.
//

use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// RequestTraceMiddleware emits a span per inbound request and a debug
/// event with status and latency when the response is sent.
pub struct RequestTraceMiddleware;

impl RequestTraceMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequestTraceMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::middleware::middleware::Middleware for RequestTraceMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
    }
}
