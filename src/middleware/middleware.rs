// Middleware interface applied by the HTTP server on top of all routes.

use axum::Router;

/// Wraps a fully routed router with one more layer.
pub trait Middleware: Send + Sync {
    fn apply(&self, router: Router) -> Router;
}
