//! AG-UI protocol event types.
//!
//! Agent-User Interaction protocol events as streamed to a UI client.
//!
//! # Event Structure
//!
//! All events share common fields:
//! - `type`: Event type discriminator
//! - `timestamp`: Optional Unix timestamp in milliseconds
//!
//! Events are organized into categories:
//! - **Run lifecycle**: `RUN_STARTED`, `RUN_FINISHED`, `RUN_ERROR`
//! - **Text messages**: `TEXT_MESSAGE_START`, `TEXT_MESSAGE_CONTENT`, `TEXT_MESSAGE_END`
//! - **Thinking**: `THINKING_START`, `THINKING_END` with nested text messages
//! - **Tool calls**: `TOOL_CALL_START`, `TOOL_CALL_ARGS`, `TOOL_CALL_END`, `TOOL_CALL_RESULT`
//! - **State**: `STATE_SNAPSHOT`
//!
//! [`AguiEvent`] is the closed set of all of these; each variant wraps the
//! struct carrying that event's fields.

use agui_bridge_core::identifier::now_millis;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Run has started.
    RunStarted,
    /// Run has finished successfully.
    RunFinished,
    /// Run encountered an error.
    RunError,
    /// Text message started.
    TextMessageStart,
    /// Text message content delta.
    TextMessageContent,
    /// Text message ended.
    TextMessageEnd,
    /// Thinking/reasoning started.
    ThinkingStart,
    /// Thinking/reasoning ended.
    ThinkingEnd,
    /// Thinking text message started (nested in thinking).
    ThinkingTextMessageStart,
    /// Thinking text message content delta.
    ThinkingTextMessageContent,
    /// Thinking text message ended.
    ThinkingTextMessageEnd,
    /// Tool call started.
    ToolCallStart,
    /// Tool call arguments delta.
    ToolCallArgs,
    /// Tool call ended (arguments complete).
    ToolCallEnd,
    /// Tool call result received.
    ToolCallResult,
    /// State snapshot (full state).
    StateSnapshot,
}

// ============================================================================
// Run Lifecycle Events
// ============================================================================

/// Run started event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStartedEvent {
    /// Thread identifier.
    pub thread_id: String,
    /// Run identifier.
    pub run_id: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl RunStartedEvent {
    /// Create a new run started event.
    pub fn new(thread_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Run finished event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFinishedEvent {
    /// Thread identifier.
    pub thread_id: String,
    /// Run identifier.
    pub run_id: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl RunFinishedEvent {
    /// Create a new run finished event.
    pub fn new(thread_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Run error event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunErrorEvent {
    /// Error message.
    pub message: String,
    /// Error code (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl RunErrorEvent {
    /// Create a new run error event.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            timestamp: Some(now_millis()),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// Text Message Events
// ============================================================================

/// Text message start event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageStartEvent {
    /// Message identifier.
    pub message_id: String,
    /// Role of the message sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TextMessageStartEvent {
    /// Create a new text message start event.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            role: Some("assistant".to_string()),
            timestamp: Some(now_millis()),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Text message content event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageContentEvent {
    /// Message identifier.
    pub message_id: String,
    /// Content delta.
    pub delta: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TextMessageContentEvent {
    /// Create a new text message content event.
    pub fn new(message_id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            delta: delta.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Text message end event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageEndEvent {
    /// Message identifier.
    pub message_id: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl TextMessageEndEvent {
    /// Create a new text message end event.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            timestamp: Some(now_millis()),
        }
    }
}

// ============================================================================
// Thinking Events
// ============================================================================

/// Thinking start event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingStartEvent {
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ThinkingStartEvent {
    /// Create a new thinking start event.
    pub fn new() -> Self {
        Self {
            timestamp: Some(now_millis()),
        }
    }
}

impl Default for ThinkingStartEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Thinking end event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingEndEvent {
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ThinkingEndEvent {
    /// Create a new thinking end event.
    pub fn new() -> Self {
        Self {
            timestamp: Some(now_millis()),
        }
    }
}

impl Default for ThinkingEndEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Thinking text message start event (nested within thinking).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingTextMessageStartEvent {
    /// Message identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ThinkingTextMessageStartEvent {
    /// Create a new thinking text message start event.
    pub fn new() -> Self {
        Self {
            message_id: None,
            timestamp: Some(now_millis()),
        }
    }

    /// Set the message ID.
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }
}

impl Default for ThinkingTextMessageStartEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Thinking text message content event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingTextMessageContentEvent {
    /// Content delta.
    pub delta: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ThinkingTextMessageContentEvent {
    /// Create a new thinking text message content event.
    pub fn new(delta: impl Into<String>) -> Self {
        Self {
            delta: delta.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Thinking text message end event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingTextMessageEndEvent {
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ThinkingTextMessageEndEvent {
    /// Create a new thinking text message end event.
    pub fn new() -> Self {
        Self {
            timestamp: Some(now_millis()),
        }
    }
}

impl Default for ThinkingTextMessageEndEvent {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tool Call Events
// ============================================================================

/// Tool call start event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallStartEvent {
    /// Tool call identifier.
    pub tool_call_id: String,
    /// Tool name.
    pub tool_call_name: String,
    /// Parent message ID (the assistant message containing this tool call).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<String>,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ToolCallStartEvent {
    /// Create a new tool call start event.
    pub fn new(tool_call_id: impl Into<String>, tool_call_name: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_call_name: tool_call_name.into(),
            parent_message_id: None,
            timestamp: Some(now_millis()),
        }
    }

    /// Set the parent message ID.
    pub fn with_parent_message_id(mut self, id: impl Into<String>) -> Self {
        self.parent_message_id = Some(id.into());
        self
    }
}

/// Tool call args event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallArgsEvent {
    /// Tool call identifier.
    pub tool_call_id: String,
    /// Arguments delta (JSON fragment).
    pub delta: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ToolCallArgsEvent {
    /// Create a new tool call args event.
    pub fn new(tool_call_id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            delta: delta.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Tool call end event (arguments complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallEndEvent {
    /// Tool call identifier.
    pub tool_call_id: String,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ToolCallEndEvent {
    /// Create a new tool call end event.
    pub fn new(tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            timestamp: Some(now_millis()),
        }
    }
}

/// Tool call result event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResultEvent {
    /// Tool call identifier.
    pub tool_call_id: String,
    /// Result content rendered as text.
    pub content: String,
    /// Id of the tool message carrying the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Role of the result message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ToolCallResultEvent {
    /// Create a new tool call result event.
    pub fn new(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            message_id: None,
            role: Some("tool".to_string()),
            timestamp: Some(now_millis()),
        }
    }

    /// Set the message ID.
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }
}

// ============================================================================
// State Events
// ============================================================================

/// State snapshot event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshotEvent {
    /// State snapshot data.
    pub snapshot: Value,
    /// Timestamp in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl StateSnapshotEvent {
    /// Create a new state snapshot event.
    pub fn new(snapshot: Value) -> Self {
        Self {
            snapshot,
            timestamp: Some(now_millis()),
        }
    }
}

// ============================================================================
// Event Union
// ============================================================================

/// Any AG-UI protocol event.
///
/// Serialized flat, with the variant name as the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AguiEvent {
    /// Run has started.
    RunStarted(RunStartedEvent),
    /// Run has finished successfully.
    RunFinished(RunFinishedEvent),
    /// Run encountered an error.
    RunError(RunErrorEvent),
    /// Text message started.
    TextMessageStart(TextMessageStartEvent),
    /// Text message content delta.
    TextMessageContent(TextMessageContentEvent),
    /// Text message ended.
    TextMessageEnd(TextMessageEndEvent),
    /// Thinking started.
    ThinkingStart(ThinkingStartEvent),
    /// Thinking ended.
    ThinkingEnd(ThinkingEndEvent),
    /// Thinking text message started.
    ThinkingTextMessageStart(ThinkingTextMessageStartEvent),
    /// Thinking text message content delta.
    ThinkingTextMessageContent(ThinkingTextMessageContentEvent),
    /// Thinking text message ended.
    ThinkingTextMessageEnd(ThinkingTextMessageEndEvent),
    /// Tool call started.
    ToolCallStart(ToolCallStartEvent),
    /// Tool call arguments.
    ToolCallArgs(ToolCallArgsEvent),
    /// Tool call arguments complete.
    ToolCallEnd(ToolCallEndEvent),
    /// Tool call result.
    ToolCallResult(ToolCallResultEvent),
    /// State snapshot.
    StateSnapshot(StateSnapshotEvent),
}

impl AguiEvent {
    /// Get the event type.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::RunStarted(_) => EventType::RunStarted,
            Self::RunFinished(_) => EventType::RunFinished,
            Self::RunError(_) => EventType::RunError,
            Self::TextMessageStart(_) => EventType::TextMessageStart,
            Self::TextMessageContent(_) => EventType::TextMessageContent,
            Self::TextMessageEnd(_) => EventType::TextMessageEnd,
            Self::ThinkingStart(_) => EventType::ThinkingStart,
            Self::ThinkingEnd(_) => EventType::ThinkingEnd,
            Self::ThinkingTextMessageStart(_) => EventType::ThinkingTextMessageStart,
            Self::ThinkingTextMessageContent(_) => EventType::ThinkingTextMessageContent,
            Self::ThinkingTextMessageEnd(_) => EventType::ThinkingTextMessageEnd,
            Self::ToolCallStart(_) => EventType::ToolCallStart,
            Self::ToolCallArgs(_) => EventType::ToolCallArgs,
            Self::ToolCallEnd(_) => EventType::ToolCallEnd,
            Self::ToolCallResult(_) => EventType::ToolCallResult,
            Self::StateSnapshot(_) => EventType::StateSnapshot,
        }
    }

    /// Get the timestamp (milliseconds since epoch).
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        match self {
            Self::RunStarted(e) => e.timestamp,
            Self::RunFinished(e) => e.timestamp,
            Self::RunError(e) => e.timestamp,
            Self::TextMessageStart(e) => e.timestamp,
            Self::TextMessageContent(e) => e.timestamp,
            Self::TextMessageEnd(e) => e.timestamp,
            Self::ThinkingStart(e) => e.timestamp,
            Self::ThinkingEnd(e) => e.timestamp,
            Self::ThinkingTextMessageStart(e) => e.timestamp,
            Self::ThinkingTextMessageContent(e) => e.timestamp,
            Self::ThinkingTextMessageEnd(e) => e.timestamp,
            Self::ToolCallStart(e) => e.timestamp,
            Self::ToolCallArgs(e) => e.timestamp,
            Self::ToolCallEnd(e) => e.timestamp,
            Self::ToolCallResult(e) => e.timestamp,
            Self::StateSnapshot(e) => e.timestamp,
        }
    }

    /// The tool call this event belongs to, for tool-call lifecycle events.
    #[must_use]
    pub fn tool_call_id(&self) -> Option<&str> {
        match self {
            Self::ToolCallStart(e) => Some(&e.tool_call_id),
            Self::ToolCallArgs(e) => Some(&e.tool_call_id),
            Self::ToolCallEnd(e) => Some(&e.tool_call_id),
            Self::ToolCallResult(e) => Some(&e.tool_call_id),
            _ => None,
        }
    }

    /// Whether this is a tool-call lifecycle event.
    #[must_use]
    pub fn is_tool_call(&self) -> bool {
        self.tool_call_id().is_some()
    }

    /// Encode the event as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

macro_rules! impl_from_event {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AguiEvent {
                fn from(event: $ty) -> Self {
                    Self::$variant(event)
                }
            }
        )*
    };
}

impl_from_event! {
    RunStarted => RunStartedEvent,
    RunFinished => RunFinishedEvent,
    RunError => RunErrorEvent,
    TextMessageStart => TextMessageStartEvent,
    TextMessageContent => TextMessageContentEvent,
    TextMessageEnd => TextMessageEndEvent,
    ThinkingStart => ThinkingStartEvent,
    ThinkingEnd => ThinkingEndEvent,
    ThinkingTextMessageStart => ThinkingTextMessageStartEvent,
    ThinkingTextMessageContent => ThinkingTextMessageContentEvent,
    ThinkingTextMessageEnd => ThinkingTextMessageEndEvent,
    ToolCallStart => ToolCallStartEvent,
    ToolCallArgs => ToolCallArgsEvent,
    ToolCallEnd => ToolCallEndEvent,
    ToolCallResult => ToolCallResultEvent,
    StateSnapshot => StateSnapshotEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_started_event() {
        let event = AguiEvent::from(RunStartedEvent::new("thread-1", "run-1"));
        let json = event.encode().unwrap();
        assert!(json.contains(r#""type":"RUN_STARTED""#));
        assert!(json.contains(r#""threadId":"thread-1""#));
        assert!(json.contains(r#""runId":"run-1""#));
    }

    #[test]
    fn test_text_message_content_event() {
        let event = AguiEvent::from(TextMessageContentEvent::new("msg-1", "Hello, world!"));
        let json = event.encode().unwrap();
        assert!(json.contains(r#""type":"TEXT_MESSAGE_CONTENT""#));
        assert!(json.contains(r#""messageId":"msg-1""#));
        assert!(json.contains(r#""delta":"Hello, world!""#));
    }

    #[test]
    fn test_tool_call_start_event() {
        let event = AguiEvent::from(
            ToolCallStartEvent::new("call-1", "get_weather").with_parent_message_id("msg-1"),
        );
        let json = event.encode().unwrap();
        assert!(json.contains(r#""type":"TOOL_CALL_START""#));
        assert!(json.contains(r#""toolCallId":"call-1""#));
        assert!(json.contains(r#""toolCallName":"get_weather""#));
        assert!(json.contains(r#""parentMessageId":"msg-1""#));
    }

    #[test]
    fn test_tool_call_result_event() {
        let event = AguiEvent::from(ToolCallResultEvent::new("call-1", "20 degrees"));
        let json = event.encode().unwrap();
        assert!(json.contains(r#""type":"TOOL_CALL_RESULT""#));
        assert!(json.contains(r#""content":"20 degrees""#));
        assert!(json.contains(r#""role":"tool""#));
        assert!(!json.contains("messageId"));
    }

    #[test]
    fn test_run_error_with_code() {
        let event = AguiEvent::from(RunErrorEvent::new("boom").with_code("TIMEOUT"));
        let json = event.encode().unwrap();
        assert!(json.contains(r#""code":"TIMEOUT""#));
    }

    #[test]
    fn test_decode_round_trip() {
        let event = AguiEvent::from(ToolCallArgsEvent::new("call-1", r#"{"q":"x"}"#));
        let decoded: AguiEvent = serde_json::from_str(&event.encode().unwrap()).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_event_type_and_tool_call_id() {
        let start = AguiEvent::from(ThinkingStartEvent::new());
        assert_eq!(start.event_type(), EventType::ThinkingStart);
        assert_eq!(start.tool_call_id(), None);

        let end = AguiEvent::from(ToolCallEndEvent::new("call-9"));
        assert_eq!(end.event_type(), EventType::ToolCallEnd);
        assert_eq!(end.tool_call_id(), Some("call-9"));
        assert!(end.is_tool_call());
    }

    #[test]
    fn test_event_timestamp() {
        let event = AguiEvent::from(RunFinishedEvent::new("t", "r"));
        assert!(event.timestamp().unwrap() > 0);
    }
}
