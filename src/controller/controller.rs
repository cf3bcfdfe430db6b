// HTTP controller trait for route registration.

use axum::Router;

/// A group of routes registered on the shared router at startup.
pub trait Controller: Send + Sync {
    /// Adds this controller's routes, e.g.
    /// ```rust
    /// # use axum::{Router, routing::get};
    /// # async fn handler() -> &'static str { "OK\n" }
    /// let router: Router<()> = Router::new().route("/healthz", get(handler));
    /// # let _ = router;
    /// ```
    fn add_route(&self, router: Router) -> Router;
}
