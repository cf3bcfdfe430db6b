// Aggregator server bootstrap for end-to-end tests.

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::Config;

/// A running aggregator bound to an ephemeral loopback port.
pub struct AggregatorServer {
    addr: String,
    shutdown_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl AggregatorServer {
    /// Starts the aggregator with the real HTTP checker.
    pub async fn start(cfg: Config) -> Self {
        let shutdown_token = CancellationToken::new();
        let app = App::new(shutdown_token.clone(), cfg);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let handle = tokio::spawn(async move {
            if let Err(e) = app.serve_on(listener).await {
                eprintln!("[aggregator] serve failed: {}", e);
            }
        });

        Self {
            addr,
            shutdown_token,
            handle,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:PORT`.
    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    /// Stops the server and waits for it to wind down.
    pub async fn stop(self) {
        self.shutdown_token.cancel();
        let _ = self.handle.await;
    }
}
