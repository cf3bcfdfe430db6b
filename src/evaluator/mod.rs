//! Health evaluation: runs probes and folds them into one verdict.

pub mod checker;
pub mod error;
#[allow(clippy::module_inception)]
pub mod evaluator;
pub mod http_checker;



pub use checker::Checker;
pub use error::{ProbeError, UnknownGroupError};
pub use evaluator::Evaluator;
pub use http_checker::HttpChecker;
