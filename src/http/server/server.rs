//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::controller::Controller;
use crate::middleware::middleware::Middleware;

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    config: Arc<Config>,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        config: Arc<Config>,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Self {
        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(router, middlewares);

        Self {
            shutdown_token,
            config,
            router,
        }
    }

    /// Binds the configured listen address and serves on it.
    pub async fn listen_and_serve(&self) -> Result<()> {
        let addr = self.config.socket_address();

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind TCP listener on {}", addr))?;

        self.serve(listener).await
    }

    /// Serves on an already bound listener until the shutdown token fires.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr: SocketAddr = listener
            .local_addr()
            .context("failed to read listener address")?;

        info!(
            component = "server",
            event = "started",
            addr = %local_addr,
            "health aggregator listening"
        );

        let shutdown_token = self.shutdown_token.clone();

        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                addr = %local_addr,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            addr = %local_addr,
            "server stopped"
        );

        Ok(())
    }

    /// Builds the router with all controllers.
    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        controllers
            .iter()
            .fold(Router::new(), |router, controller| controller.add_route(router))
    }

    /// Merges middlewares into the router; the first middleware ends up outermost.
    fn merge_middlewares(router: Router, middlewares: Vec<Box<dyn Middleware>>) -> Router {
        middlewares
            .iter()
            .rev()
            .fold(router, |router, middleware| middleware.apply(router))
    }
}
