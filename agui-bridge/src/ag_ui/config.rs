//! Adapter configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default maximum depth for unpacking nested traces.
pub const DEFAULT_MAX_UNPACK_DEPTH: usize = 8;

/// How literal output blocks of a tool result are joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralJoin {
    /// Join directly, with nothing in between.
    #[default]
    Concat,
    /// Join with the given separator.
    Separator(String),
}

impl LiteralJoin {
    /// Join the given pieces according to this policy.
    #[must_use]
    pub fn join(&self, pieces: &[String]) -> String {
        match self {
            Self::Concat => pieces.concat(),
            Self::Separator(sep) => pieces.join(sep),
        }
    }
}

/// How thinking blocks are surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingMode {
    /// As regular text message content.
    #[default]
    AsText,
    /// As AG-UI thinking lifecycle events.
    AsThinkingEvents,
    /// Not surfaced at all.
    Drop,
}

/// Configuration for the AG-UI adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Maximum nesting depth for unpacking serialized sub-traces.
    pub max_unpack_depth: usize,
    /// Join policy for literal tool output.
    pub literal_join: LiteralJoin,
    /// Whether to emit tool call arguments.
    pub emit_tool_call_args: bool,
    /// How thinking blocks are surfaced.
    pub thinking_mode: ThinkingMode,
    /// Whether to emit the run input's state as a snapshot after run start.
    pub emit_state_snapshot: bool,
    /// Deadline for the whole upstream source.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "option_duration_serde"
    )]
    pub run_timeout: Option<Duration>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_unpack_depth: DEFAULT_MAX_UNPACK_DEPTH,
            literal_join: LiteralJoin::Concat,
            emit_tool_call_args: true,
            thinking_mode: ThinkingMode::AsText,
            emit_state_snapshot: true,
            run_timeout: None,
        }
    }
}

impl AdapterConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum unpack depth.
    #[must_use]
    pub fn max_unpack_depth(mut self, depth: usize) -> Self {
        self.max_unpack_depth = depth;
        self
    }

    /// Set the literal join policy.
    #[must_use]
    pub fn literal_join(mut self, join: LiteralJoin) -> Self {
        self.literal_join = join;
        self
    }

    /// Join literal output with a separator.
    #[must_use]
    pub fn literal_separator(self, separator: impl Into<String>) -> Self {
        self.literal_join(LiteralJoin::Separator(separator.into()))
    }

    /// Enable or disable tool call argument events.
    #[must_use]
    pub fn emit_tool_call_args(mut self, emit: bool) -> Self {
        self.emit_tool_call_args = emit;
        self
    }

    /// Set how thinking is surfaced.
    #[must_use]
    pub fn thinking_mode(mut self, mode: ThinkingMode) -> Self {
        self.thinking_mode = mode;
        self
    }

    /// Enable or disable the initial state snapshot.
    #[must_use]
    pub fn emit_state_snapshot(mut self, emit: bool) -> Self {
        self.emit_state_snapshot = emit;
        self
    }

    /// Set the run timeout.
    #[must_use]
    pub fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }
}

/// Serde helper for optional Duration.
mod option_duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => d.as_secs_f64().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<f64> = Option::deserialize(deserializer)?;
        opt.map(Duration::try_from_secs_f64)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
