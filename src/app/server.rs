// Composition of the inbound HTTP server: controllers plus middlewares.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::controller;
use crate::evaluator::Evaluator;
use crate::http::{Controller, HttpServer, Middleware};
use crate::middleware::recover_middleware::PanicRecoverMiddleware;
use crate::middleware::trace_middleware::RequestTraceMiddleware;

/// Creates the HTTP server instance with controllers and middlewares.
pub fn make_http_server(
    ctx: CancellationToken,
    cfg: Arc<Config>,
    evaluator: Evaluator,
) -> HttpServer {
    HttpServer::new(ctx, cfg, controllers(evaluator), middlewares())
}

/// Returns all HTTP controllers for the server.
fn controllers(evaluator: Evaluator) -> Vec<Box<dyn Controller>> {
    vec![
        // Aggregate and per-group health checks
        Box::new(controller::HealthzController::new(evaluator)),
    ]
}

/// Returns the request middlewares; the first one is the outermost layer.
fn middlewares() -> Vec<Box<dyn Middleware>> {
    vec![
        // Exec first - request span
        Box::new(RequestTraceMiddleware::new()),
        // Exec second - panic recovery
        Box::new(PanicRecoverMiddleware::new()),
    ]
}
