// Scripted in-memory checker for evaluator and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::evaluator::{Checker, ProbeError};
use crate::model::Probe;

/// Answers each probe from a script keyed by URL and records every call.
/// URLs missing from the script pass.
#[derive(Clone, Default)]
pub struct ScriptedChecker {
    script: Arc<Mutex<HashMap<String, ProbeError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every probe against `url` fail with `err`.
    pub fn fail(self, url: &str, err: ProbeError) -> Self {
        self.script.lock().unwrap().insert(url.to_string(), err);
        self
    }

    /// Probe names in the order they were checked.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, probe: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == probe).count()
    }
}

#[async_trait::async_trait]
impl Checker for ScriptedChecker {
    async fn check(&self, probe: &Probe) -> Result<(), ProbeError> {
        self.calls.lock().unwrap().push(probe.name.clone());
        match self.script.lock().unwrap().get(&probe.url) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
