//! Internal execution events.
//!
//! An [`Event`] is one unit of the agent runtime's own execution trace. Events
//! of a run arrive in a single total order and are never reordered.

use crate::messages::{ContentBlock, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an internal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Reasoning step: thinking, text and tool invocations.
    Reasoning,
    /// Tool execution results.
    ToolResult,
    /// Hint injected into the conversation (e.g. retrieved context).
    Hint,
    /// Summary produced when the agent stops early.
    Summary,
    /// Final agent reply.
    AgentResult,
}

impl EventType {
    /// Whether an event of this kind closes the current reasoning turn.
    #[must_use]
    pub fn ends_reasoning_turn(&self) -> bool {
        matches!(self, Self::ToolResult)
    }

    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reasoning => "REASONING",
            Self::ToolResult => "TOOL_RESULT",
            Self::Hint => "HINT",
            Self::Summary => "SUMMARY",
            Self::AgentResult => "AGENT_RESULT",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An internal execution event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event kind.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// The message carried by this event.
    pub message: Message,
    /// Marks the last event of a run or sub-run.
    #[serde(default, alias = "isLast")]
    pub is_final: bool,
}

impl Event {
    /// Create a new event.
    #[must_use]
    pub fn new(event_type: EventType, message: Message, is_final: bool) -> Self {
        Self {
            event_type,
            message,
            is_final,
        }
    }

    /// Create a non-final reasoning event.
    #[must_use]
    pub fn reasoning(message: Message) -> Self {
        Self::new(EventType::Reasoning, message, false)
    }

    /// Create a non-final tool result event.
    #[must_use]
    pub fn tool_result(message: Message) -> Self {
        Self::new(EventType::ToolResult, message, false)
    }

    /// Mark this event as final.
    #[must_use]
    pub fn finalized(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Content blocks of the carried message.
    #[must_use]
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.message.content
    }
}
