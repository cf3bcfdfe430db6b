//! HTTP implementation of [`Checker`].

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, Uri};
use tokio::time::timeout;
use tracing::debug;

use crate::http::client::{create_client, HyperClient};
use crate::model::Probe;

use super::error::error_chain;
use super::{Checker, ProbeError};

/// Issues one GET per probe through a shared pooled client.
#[derive(Clone)]
pub struct HttpChecker {
    client: HyperClient,
}

impl HttpChecker {
    pub fn new() -> Self {
        Self {
            client: create_client(),
        }
    }

    /// Sends the request and drains the body, returning the status code.
    async fn exchange(&self, uri: Uri) -> Result<u16, ProbeError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(hyper::header::USER_AGENT, concat!("healthagg/", env!("CARGO_PKG_VERSION")))
            .body(Empty::<Bytes>::new())
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;

        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;

        let status = response.status().as_u16();

        // Content is irrelevant; reading it to the end releases the connection.
        // Frames are dropped as they arrive so large bodies are never buffered.
        let mut body = response.into_body();
        while let Some(frame) = body.frame().await {
            frame.map_err(|e| {
                ProbeError::Transport(format!("read response body: {}", error_chain(&e)))
            })?;
        }

        Ok(status)
    }
}

impl Default for HttpChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, probe: &Probe) -> Result<(), ProbeError> {
        let uri = parse_target(&probe.url)?;
        let deadline = probe.effective_timeout();

        let status = match timeout(deadline, self.exchange(uri)).await {
            Ok(result) => result?,
            Err(_) => return Err(ProbeError::Timeout(deadline)),
        };

        debug!(
            component = "checker",
            event = "probe_response",
            probe = %probe.name,
            url = %probe.url,
            status = status,
            "probe responded"
        );

        if probe.accepts(status) {
            Ok(())
        } else {
            Err(ProbeError::UnexpectedStatus {
                actual: status,
                expected: probe.expected_status.unwrap_or_default(),
            })
        }
    }
}

/// Accepts only absolute http(s) URLs.
fn parse_target(raw: &str) -> Result<Uri, ProbeError> {
    let url = url::Url::parse(raw)
        .map_err(|e| ProbeError::Transport(format!("invalid url {:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ProbeError::Transport(format!(
                "unsupported protocol scheme {:?} in {:?}",
                other, raw
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ProbeError::Transport(format!("no host in url {:?}", raw)));
    }

    url.as_str()
        .parse::<Uri>()
        .map_err(|e| ProbeError::Transport(format!("invalid url {:?}: {}", raw, e)))
}
