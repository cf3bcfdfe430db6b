//! Panic recovery middleware.
//

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

/// PanicRecoverMiddleware turns a panicking handler into a 500 response
/// instead of tearing down the connection.
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    /// Creates a new panic recovery middleware.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanicRecoverMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

fn recover(panic: Box<dyn Any + Send + 'static>) -> Response {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);

    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(
        component = "middleware",
        scope = "recover",
        event = "panic_recovered",
        panic = %detail,
        "handler panicked"
    );

    (StatusCode::INTERNAL_SERVER_ERROR, "FAIL\n").into_response()
}

impl crate::middleware::middleware::Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        router.layer(CatchPanicLayer::custom(recover))
    }
}
