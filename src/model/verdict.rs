// Per-request evaluation result.

use crate::evaluator::ProbeError;

/// Outcome of one evaluation pass. Never stored beyond the response.
#[derive(Debug)]
pub enum Verdict {
    Passed,
    Failed(Failure),
}

impl Verdict {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Verdict::Passed => None,
            Verdict::Failed(failure) => Some(failure),
        }
    }
}

/// The first probe that failed and why.
#[derive(Debug)]
pub struct Failure {
    pub group: String,
    pub probe: String,
    pub reason: ProbeError,
}
