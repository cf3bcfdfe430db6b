// Package api provides the aggregate and per-group health check routes.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::any,
    Router,
};
use tracing::error;

use crate::evaluator::{Evaluator, UnknownGroupError};
use crate::http::Controller;
use crate::model::Verdict;

pub const HEALTHZ_PATH: &str = "/healthz";

const SUCCESS_RESPONSE: &str = "OK\n";
const FAILED_RESPONSE: &str = "FAIL\n";
const NOT_FOUND_RESPONSE: &str = "404 page not found\n";

/// HealthzController maps `/healthz` routes onto the evaluator.
#[derive(Clone)]
pub struct HealthzController {
    evaluator: Evaluator,
}

impl HealthzController {
    /// Creates a new health check controller.
    pub fn new(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    /// Evaluates every group.
    async fn aggregate(&self) -> Response {
        let evaluator = self.evaluator.clone();
        detach(async move { Ok::<_, UnknownGroupError>(evaluator.evaluate_all().await) }).await
    }

    /// Evaluates one named group.
    async fn group(&self, name: String) -> Response {
        let evaluator = self.evaluator.clone();
        detach(async move { evaluator.evaluate_group(&name).await }).await
    }
}

/// Runs the evaluation on its own task: if the client goes away and the
/// handler future is dropped, in-flight probes still run to completion.
async fn detach<F>(evaluation: F) -> Response
where
    F: std::future::Future<Output = Result<Verdict, UnknownGroupError>> + Send + 'static,
{
    match tokio::spawn(evaluation).await {
        Ok(Ok(Verdict::Passed)) => (StatusCode::OK, SUCCESS_RESPONSE).into_response(),
        Ok(Ok(Verdict::Failed(_))) => {
            (StatusCode::INTERNAL_SERVER_ERROR, FAILED_RESPONSE).into_response()
        }
        Ok(Err(_)) => (StatusCode::NOT_FOUND, NOT_FOUND_RESPONSE).into_response(),
        Err(e) => {
            error!(
                component = "healthz",
                event = "evaluation_aborted",
                error = %e,
                "health evaluation task did not complete"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, FAILED_RESPONSE).into_response()
        }
    }
}

impl Controller for HealthzController {
    fn add_route(&self, router: Router) -> Router {
        let aggregate = self.clone();
        let group = self.clone();
        router
            .route(
                HEALTHZ_PATH,
                any(move || {
                    let controller = aggregate.clone();
                    async move { controller.aggregate().await }
                }),
            )
            .route(
                "/healthz/",
                any(|| async { Redirect::to(HEALTHZ_PATH) }),
            )
            .route(
                "/healthz/:name",
                any(move |Path(name): Path<String>| {
                    let controller = group.clone();
                    async move { controller.group(name).await }
                }),
            )
    }
}
