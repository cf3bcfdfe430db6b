use super::{Config, Logs};
use crate::model::Probe;
use std::collections::HashMap;
use std::time::Duration;

/// Creates a new test configuration with no check groups.
pub fn new_test_config() -> Config {
    Config {
        env: Some(super::TEST.to_string()),
        listen_address: "127.0.0.1:0".to_string(),
        shutdown_timeout: Some(Duration::from_secs(1)),
        logs: Some(Logs {
            level: Some("debug".to_string()),
        }),
        checks: HashMap::new(),
    }
}

impl Config {
    /// Adds (or replaces) a check group. Test and embedding helper.
    pub fn with_group(mut self, name: impl Into<String>, probes: Vec<Probe>) -> Self {
        self.checks.insert(name.into(), probes);
        self
    }
}
