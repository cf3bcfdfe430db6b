//! Hyper HTTP client used to run outbound probes.
//!
//! One client is built at startup and shared by every evaluation:
//! - http and https targets (native root certificates, bundled webpki
//!   roots when the platform store is empty or unreadable)
//! - small idle pool per host, probes hit the same targets repeatedly
//! - TCP_NODELAY enabled
//! - no connect timeout of its own, the per-probe deadline bounds the call

use http_body_util::Empty;
use hyper::body::Bytes;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::dns::GaiResolver;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tracing::warn;

/// Connection pool configuration constants.
pub const CONNS_PER_HOST: usize = 8;
pub const MAX_IDLE_CONN_DURATION: Duration = Duration::from_secs(30);

pub type HyperClient = Client<HttpsConnector<HttpConnector<GaiResolver>>, Empty<Bytes>>;

/// Creates the probe client.
pub fn create_client() -> HyperClient {
    let resolver = GaiResolver::new();

    let mut http_connector = HttpConnector::new_with_resolver(resolver);
    http_connector.set_nodelay(true);
    http_connector.set_keepalive(Some(Duration::from_secs(30)));
    http_connector.enforce_http(false);

    let roots = match hyper_rustls::HttpsConnectorBuilder::new().with_native_roots() {
        Ok(builder) => builder,
        Err(e) => {
            warn!(
                component = "http_client",
                event = "native_roots_unavailable",
                error = %e,
                "falling back to bundled webpki roots"
            );
            hyper_rustls::HttpsConnectorBuilder::new().with_webpki_roots()
        }
    };

    let tls = roots
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http_connector);

    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(MAX_IDLE_CONN_DURATION)
        .pool_max_idle_per_host(CONNS_PER_HOST)
        .build(tls)
}
