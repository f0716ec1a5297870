//! Run errors and warnings.

use std::time::Duration;
use thiserror::Error;

/// Failure of the upstream event source.
///
/// These end the run with a `RUN_ERROR` event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The agent runtime failed.
    #[error("Agent error: {0}")]
    Agent(String),

    /// The source did not complete within the run timeout.
    #[error("Run timed out after {0:?}")]
    Timeout(Duration),

    /// The source stopped because the run was cancelled upstream.
    #[error("Run cancelled")]
    Cancelled,
}

impl SourceError {
    /// Create an agent error from any displayable error.
    pub fn agent<E: std::fmt::Display>(err: E) -> Self {
        Self::Agent(err.to_string())
    }

    /// Error code carried by the `RUN_ERROR` event.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Agent(_) => "AGENT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Non-fatal condition detected while translating a run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunWarning {
    /// More than one event in a run was marked final.
    #[error("final event #{occurrence} received after the run's final event")]
    DuplicateFinalEvent {
        /// Ordinal of this final event within the run (2 for the first duplicate).
        occurrence: usize,
    },

    /// A nested trace exceeded the unpack depth and was kept as literal text.
    #[error("nested trace in tool call {tool_call_id} exceeds max unpack depth {depth}")]
    UnpackDepthExceeded {
        /// Tool call whose output held the trace.
        tool_call_id: String,
        /// The configured maximum depth.
        depth: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_codes() {
        assert_eq!(SourceError::agent("model down").code(), "AGENT_ERROR");
        assert_eq!(SourceError::Timeout(Duration::from_secs(1)).code(), "TIMEOUT");
        assert_eq!(SourceError::Cancelled.code(), "CANCELLED");
        assert_eq!(SourceError::agent("model down").to_string(), "Agent error: model down");
    }

    #[test]
    fn test_warning_display() {
        let warning = RunWarning::UnpackDepthExceeded {
            tool_call_id: "tc-1".to_string(),
            depth: 4,
        };
        assert_eq!(
            warning.to_string(),
            "nested trace in tool call tc-1 exceeds max unpack depth 4"
        );
    }
}
