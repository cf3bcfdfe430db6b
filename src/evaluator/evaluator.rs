// Sequential, short-circuiting evaluation of probe groups.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::{Config, ConfigTrait};
use crate::model::{Failure, Probe, Verdict};

use super::{Checker, UnknownGroupError};

/// Runs probe groups against a read-only configuration.
///
/// Each call is an independent pass with no state carried between calls,
/// so one instance is shared by every concurrent request.
#[derive(Clone)]
pub struct Evaluator {
    cfg: Arc<Config>,
    checker: Arc<dyn Checker>,
}

impl Evaluator {
    pub fn new(cfg: Arc<Config>, checker: Arc<dyn Checker>) -> Self {
        Self { cfg, checker }
    }

    /// Runs `probes` in order and stops at the first failure.
    pub async fn evaluate(&self, group: &str, probes: &[Probe]) -> Verdict {
        for probe in probes {
            let started = Instant::now();
            match self.checker.check(probe).await {
                Ok(()) => {
                    debug!(
                        component = "evaluator",
                        event = "probe_passed",
                        group = %group,
                        probe = %probe.name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "probe passed"
                    );
                }
                Err(reason) => {
                    warn!(
                        component = "evaluator",
                        event = "probe_failed",
                        group = %group,
                        probe = %probe.name,
                        kind = %reason.kind(),
                        reason = %reason,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "health check failed"
                    );
                    return Verdict::Failed(Failure {
                        group: group.to_string(),
                        probe: probe.name.clone(),
                        reason,
                    });
                }
            }
        }
        Verdict::Passed
    }

    /// Evaluates a single configured group.
    pub async fn evaluate_group(&self, name: &str) -> Result<Verdict, UnknownGroupError> {
        let probes = self
            .cfg
            .group(name)
            .ok_or_else(|| UnknownGroupError(name.to_string()))?;
        Ok(self.evaluate(name, probes).await)
    }

    /// Evaluates every group and stops at the first failure anywhere.
    /// Group order follows map iteration and is not stable between runs.
    pub async fn evaluate_all(&self) -> Verdict {
        for (name, probes) in self.cfg.checks() {
            if let Verdict::Failed(failure) = self.evaluate(name, probes).await {
                return Verdict::Failed(failure);
            }
        }
        Verdict::Passed
    }
}
