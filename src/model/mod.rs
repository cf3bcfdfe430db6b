// Data model shared by the config loader and the evaluator.

pub mod probe;
pub mod verdict;


pub use probe::{Probe, DEFAULT_PROBE_TIMEOUT};
pub use verdict::{Failure, Verdict};
