// Probe descriptor: one HTTP reachability/status check against one URL.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied when a probe leaves `timeout` unset or zero.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// A single configured check. Created once at load time and shared
/// read-only across every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Probe {
    pub name: String,
    pub url: String,
    #[serde(rename = "expected_status", default)]
    pub expected_status: Option<u16>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Probe {
    pub fn new(name: impl Into<String>, url: impl Into<String>, expected_status: u16) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expected_status: Some(expected_status),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured timeout, or 1s when it is unset or zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout {
            Some(t) if !t.is_zero() => t,
            _ => DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Reports whether `status` satisfies the expectation.
    /// A probe without `expected_status` is unconstrained.
    pub fn accepts(&self, status: u16) -> bool {
        self.expected_status.map_or(true, |expected| expected == status)
    }
}
