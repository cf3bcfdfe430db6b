// Health aggregator application wiring and lifecycle.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{Config, ConfigTrait};
use crate::evaluator::{Checker, Evaluator, HttpChecker};
use crate::http::HttpServer;

use super::server::make_http_server;

/// Encapsulates the application: immutable config, evaluator and server.
#[derive(Clone)]
pub struct App {
    cfg: Arc<Config>,
    shutdown_token: CancellationToken,
    server: Arc<HttpServer>,
}

impl App {
    /// Creates the application with the real HTTP checker.
    pub fn new(shutdown_token: CancellationToken, cfg: Config) -> Self {
        Self::with_checker(shutdown_token, cfg, Arc::new(HttpChecker::new()))
    }

    /// Creates the application with a custom probe checker.
    pub fn with_checker(
        shutdown_token: CancellationToken,
        cfg: Config,
        checker: Arc<dyn Checker>,
    ) -> Self {
        let cfg = Arc::new(cfg);
        let evaluator = Evaluator::new(cfg.clone(), checker);
        let server = Arc::new(make_http_server(shutdown_token.clone(), cfg.clone(), evaluator));

        Self {
            cfg,
            shutdown_token,
            server,
        }
    }

    /// Logs what was loaded: probe count per group and the total.
    pub fn log_loaded_checks(&self, source: &str) {
        self.cfg.warn_questionable_probes();
        for (group, probes) in self.cfg.checks() {
            info!(
                component = "app",
                event = "group_loaded",
                group = %group,
                checks = probes.len(),
                "loaded checks for group"
            );
        }
        info!(
            component = "app",
            event = "config_loaded",
            groups = self.cfg.checks().len(),
            checks = self.cfg.total_probes(),
            source = %source,
            "loaded checks"
        );
    }

    /// Binds the configured address and serves until shutdown.
    /// A bind failure is returned to the caller.
    pub async fn serve(&self) -> Result<()> {
        info!(
            component = "app",
            event = "started",
            listen_address = %self.cfg.listen_address(),
            "application lifecycle"
        );
        self.server.listen_and_serve().await
    }

    /// Serves on an already bound listener until shutdown.
    pub async fn serve_on(&self, listener: TcpListener) -> Result<()> {
        self.server.serve(listener).await
    }

    /// Stops accepting connections and lets in-flight requests finish.
    pub fn close(&self) {
        self.shutdown_token.cancel();
        info!(
            component = "app",
            event = "stopped",
            "application lifecycle"
        );
    }
}
