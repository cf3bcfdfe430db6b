// Checker trait: runs one probe against its target.

use crate::model::Probe;

use super::ProbeError;

/// Executes a single probe. Implementations must not retry and must bound
/// the call by [`Probe::effective_timeout`].
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, probe: &Probe) -> Result<(), ProbeError>;
}
