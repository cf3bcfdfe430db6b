// Probe target server for tests: serves canned statuses and delays,
// and counts hits per path.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Hit counters keyed by request path.
#[derive(Clone, Default)]
pub struct TargetCounters {
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TargetCounters {
    fn inc(&self, path: &str) {
        *self.hits.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, path: &str) -> usize {
        *self.hits.lock().unwrap().get(path).unwrap_or(&0)
    }
}

/// In-process HTTP target.
///
/// Routes:
/// - `/status/:code/*tag`      responds with `code`
/// - `/slow/:ms/*tag`          waits `ms` before responding 200
/// - `/slow-body/:ms/*tag`     sends 200 headers at once, body after `ms`
/// - `/large/:kib/*tag`        streams `kib` KiB of 200 body in 64 KiB chunks
/// - `/redirect/*tag`          307 to `/status/200/redirected`
pub struct TargetServer {
    addr: String,
    counters: TargetCounters,
    handle: JoinHandle<()>,
}

impl TargetServer {
    pub async fn start() -> Self {
        let counters = TargetCounters::default();
        let counting = counters.clone();

        let router = Router::new()
            .route("/status/:code/*tag", get(status))
            .route("/slow/:ms/*tag", get(slow))
            .route("/slow-body/:ms/*tag", get(slow_body))
            .route("/large/:kib/*tag", get(large))
            .route("/redirect/*tag", get(redirect))
            .layer(axum::middleware::from_fn(move |req: Request, next: axum::middleware::Next| {
                let counting = counting.clone();
                async move {
                    counting.inc(req.uri().path());
                    next.run(req).await
                }
            }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            counters,
            handle,
        }
    }

    /// Absolute URL for `path` on this target.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.counters.get(path)
    }
}

impl Drop for TargetServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Returns a loopback URL nobody listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/healthz", addr)
}

async fn status(Path((code, _tag)): Path<(u16, String)>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, "target\n").into_response()
}

async fn slow(Path((ms, _tag)): Path<(u64, String)>) -> Response {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    (StatusCode::OK, "slow\n").into_response()
}

async fn slow_body(Path((ms, _tag)): Path<(u64, String)>) -> Response {
    let chunks = futures::stream::once(async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok::<_, Infallible>(Bytes::from_static(b"late body\n"))
    });
    (StatusCode::OK, Body::from_stream(chunks)).into_response()
}

async fn large(Path((kib, _tag)): Path<(usize, String)>) -> Response {
    const CHUNK: usize = 64 * 1024;
    let total = kib * 1024;
    let chunk = Bytes::from(vec![b'x'; CHUNK]);
    let chunks = futures::stream::iter((0..total).step_by(CHUNK).map(move |offset| {
        Ok::<_, Infallible>(chunk.slice(..CHUNK.min(total - offset)))
    }));
    (StatusCode::OK, Body::from_stream(chunks)).into_response()
}

async fn redirect() -> Response {
    axum::response::Redirect::temporary("/status/200/redirected").into_response()
}
