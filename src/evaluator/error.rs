// Error definitions for probe evaluation.

use std::time::Duration;

/// Why a single probe failed. Never fatal: it becomes a 500 and a log line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// DNS, connect, TLS, malformed URL or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The whole exchange, body drain included, exceeded the deadline.
    #[error("transport error: timed out after {}", format_timeout(.0))]
    Timeout(Duration),
    #[error("unexpected status {actual} (expected {expected})")]
    UnexpectedStatus { actual: u16, expected: u16 },
}

impl ProbeError {
    /// Short classifier used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Transport(_) => "transport",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::UnexpectedStatus { .. } => "unexpected_status",
        }
    }
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// A named-group route asked for a group that is not configured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check group {0:?}")]
pub struct UnknownGroupError(pub String);

/// Flattens an error and its sources into one line.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}
