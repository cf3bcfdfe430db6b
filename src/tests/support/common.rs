// Common test utilities for end-to-end tests.

use std::time::Duration;

/// Status, body and Location header of one response.
pub type Reply = (u16, String, Option<String>);

/// Client that never follows redirects, so 303s stay observable.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// Issues a GET and collects the reply.
pub async fn get(url: &str) -> Result<Reply, reqwest::Error> {
    let resp = client().get(url).send().await?;
    let status = resp.status().as_u16();
    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await?;
    Ok((status, body, location))
}

/// Asserts that a request succeeded and returns the reply.
pub fn assert_ok(result: Result<Reply, reqwest::Error>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => panic!("request failed: {}", e),
    }
}
