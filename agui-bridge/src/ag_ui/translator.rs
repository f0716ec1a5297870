//! Internal event to AG-UI event translation.
//!
//! [`Translator`] consumes one internal [`Event`] at a time and returns the
//! protocol events it maps to. Content blocks are translated in order:
//!
//! | Block | Protocol events |
//! |-------|-----------------|
//! | `Text` | `TEXT_MESSAGE_CONTENT` |
//! | `Thinking` | `TEXT_MESSAGE_CONTENT` (or thinking events, see [`ThinkingMode`]) |
//! | `ToolUse` | `TOOL_CALL_START`, `TOOL_CALL_ARGS`, `TOOL_CALL_END` |
//! | `ToolResult` | unpacked nested events, then `TOOL_CALL_RESULT` |
//!
//! The translator also keeps the text framing of the run: the open text
//! message (bracketed by `TEXT_MESSAGE_START`/`TEXT_MESSAGE_END`) and the open
//! thinking block.
//!
//! Protocol message ids are unique within a run, nested runs included. A text
//! segment reopened after its framing was closed, or a tool result carried by
//! a message that already started text, gets `{id}-{n}`.

use super::config::{AdapterConfig, ThinkingMode};
use super::error::RunWarning;
use super::types::*;
use super::unpack::unpack_nested;
use agui_bridge_core::identifier::generate_message_id;
use agui_bridge_core::{ContentBlock, Event, Message, ToolResultBlock, ToolUseBlock};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Phase of a run as seen by the translator.
///
/// A closed run is a translator that has been consumed by
/// [`Translator::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Events are being translated.
    Streaming,
    /// An event marked final has been translated.
    FinalEventSeen,
}

/// State tracking for the open text message.
#[derive(Debug)]
struct TextMessageState {
    /// ID of the internal message being streamed.
    source_id: String,
    /// Protocol message ID.
    message_id: String,
}

/// Protocol message ids already used in a run.
#[derive(Debug, Default)]
pub(crate) struct MessageIds(HashSet<String>);

impl MessageIds {
    /// Claim `base`, or the first free `{base}-{n}` if it is taken.
    fn claim(&mut self, base: &str) -> String {
        if self.0.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let id = format!("{}-{}", base, n);
            if self.0.insert(id.clone()) {
                return id;
            }
            n += 1;
        }
    }
}

/// State tracking for thinking/reasoning.
#[derive(Debug, Default)]
struct ThinkingState {
    /// Whether thinking has started.
    started: bool,
    /// Whether thinking text message has started.
    text_started: bool,
}

/// Stateful translator for a single run.
///
/// # Example
///
/// ```rust
/// use agui_bridge::ag_ui::{AdapterConfig, AguiEvent, Translator};
/// use agui_bridge_core::{ContentBlock, Event, Message};
/// use std::sync::Arc;
///
/// let mut translator = Translator::new(Arc::new(AdapterConfig::default()));
/// let event = Event::tool_result(Message::tool(ContentBlock::tool_result(
///     "t1",
///     vec![ContentBlock::text("plain answer")],
/// )));
///
/// let events = translator.translate(&event);
/// assert!(matches!(
///     events.as_slice(),
///     [AguiEvent::ToolCallResult(r)] if r.tool_call_id == "t1" && r.content == "plain answer"
/// ));
/// ```
#[derive(Debug)]
pub struct Translator {
    config: Arc<AdapterConfig>,
    /// Nesting depth; 0 for the top-level run.
    depth: usize,
    phase: RunPhase,
    /// Number of final events seen.
    final_events: usize,
    text_state: Option<TextMessageState>,
    thinking_state: ThinkingState,
    message_ids: MessageIds,
    warnings: Vec<RunWarning>,
}

impl Translator {
    /// Create a translator for a top-level run.
    pub fn new(config: Arc<AdapterConfig>) -> Self {
        Self::nested(config, 0, MessageIds::default())
    }

    /// Create a translator for a run nested at `depth`, sharing the
    /// enclosing run's message ids.
    pub(crate) fn nested(config: Arc<AdapterConfig>, depth: usize, message_ids: MessageIds) -> Self {
        Self {
            config,
            depth,
            phase: RunPhase::Streaming,
            final_events: 0,
            text_state: None,
            thinking_state: ThinkingState::default(),
            message_ids,
            warnings: Vec::new(),
        }
    }

    /// Get the nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Get the warnings collected so far.
    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }

    /// Take the warnings collected so far.
    pub fn drain_warnings(&mut self) -> Vec<RunWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Translate one internal event.
    ///
    /// Never drops content: an event arriving after the run's final event is
    /// still translated, and recorded as [`RunWarning::DuplicateFinalEvent`]
    /// if it is itself final.
    pub fn translate(&mut self, event: &Event) -> Vec<AguiEvent> {
        let mut events = Vec::new();

        if event.event_type.ends_reasoning_turn() {
            self.close_framing(&mut events);
        }

        let message_id = event
            .message
            .id
            .clone()
            .unwrap_or_else(generate_message_id);

        for block in &event.message.content {
            match block {
                ContentBlock::Text(text) => {
                    self.emit_text(&event.message, &message_id, &text.text, &mut events);
                }
                ContentBlock::Thinking(thinking) => match self.config.thinking_mode {
                    ThinkingMode::AsText => {
                        self.emit_text(&event.message, &message_id, &thinking.thinking, &mut events);
                    }
                    ThinkingMode::AsThinkingEvents => {
                        self.emit_thinking(&thinking.thinking, &mut events);
                    }
                    ThinkingMode::Drop => {}
                },
                ContentBlock::ToolUse(tool_use) => {
                    self.close_framing(&mut events);
                    self.emit_tool_call(tool_use, &message_id, &mut events);
                }
                ContentBlock::ToolResult(result) => {
                    self.close_framing(&mut events);
                    self.emit_tool_result(result, &message_id, &mut events);
                }
            }
        }

        if event.is_final {
            self.final_events += 1;
            if self.final_events > 1 {
                let warning = RunWarning::DuplicateFinalEvent {
                    occurrence: self.final_events,
                };
                warn!(depth = self.depth, %warning, "protocol violation");
                self.warnings.push(warning);
            }
            self.phase = RunPhase::FinalEventSeen;
            self.close_framing(&mut events);
        }

        events
    }

    /// Close any open text message or thinking block.
    pub fn close(&mut self) -> Vec<AguiEvent> {
        let mut events = Vec::new();
        self.close_framing(&mut events);
        events
    }

    /// Finish the run, closing any open framing.
    pub fn finish(mut self) -> Vec<AguiEvent> {
        self.close()
    }

    /// Finish a nested run, handing its message ids back to the parent.
    pub(crate) fn finish_nested(mut self) -> (Vec<AguiEvent>, MessageIds) {
        let events = self.close();
        (events, self.message_ids)
    }

    fn close_framing(&mut self, events: &mut Vec<AguiEvent>) {
        self.close_thinking(events);
        self.close_text(events);
    }

    fn close_text(&mut self, events: &mut Vec<AguiEvent>) {
        if let Some(state) = self.text_state.take() {
            events.push(TextMessageEndEvent::new(state.message_id).into());
        }
    }

    fn close_thinking(&mut self, events: &mut Vec<AguiEvent>) {
        if self.thinking_state.text_started {
            events.push(ThinkingTextMessageEndEvent::new().into());
        }
        if self.thinking_state.started {
            events.push(ThinkingEndEvent::new().into());
        }
        self.thinking_state = ThinkingState::default();
    }

    fn emit_text(
        &mut self,
        message: &Message,
        message_id: &str,
        delta: &str,
        events: &mut Vec<AguiEvent>,
    ) {
        self.close_thinking(events);

        let continues = matches!(&self.text_state, Some(state) if state.source_id == message_id);
        if !continues {
            self.close_text(events);
            let protocol_id = self.message_ids.claim(message_id);
            events.push(
                TextMessageStartEvent::new(&protocol_id)
                    .with_role(message.role.as_str())
                    .into(),
            );
            self.text_state = Some(TextMessageState {
                source_id: message_id.to_string(),
                message_id: protocol_id,
            });
        }

        if let Some(state) = &self.text_state {
            events.push(TextMessageContentEvent::new(&state.message_id, delta).into());
        }
    }

    fn emit_thinking(&mut self, delta: &str, events: &mut Vec<AguiEvent>) {
        self.close_text(events);

        if !self.thinking_state.started {
            events.push(ThinkingStartEvent::new().into());
            self.thinking_state.started = true;
        }
        if !self.thinking_state.text_started {
            events.push(ThinkingTextMessageStartEvent::new().into());
            self.thinking_state.text_started = true;
        }

        events.push(ThinkingTextMessageContentEvent::new(delta).into());
    }

    fn emit_tool_call(&self, tool_use: &ToolUseBlock, message_id: &str, events: &mut Vec<AguiEvent>) {
        events.push(
            ToolCallStartEvent::new(&tool_use.id, &tool_use.name)
                .with_parent_message_id(message_id)
                .into(),
        );
        if self.config.emit_tool_call_args {
            events.push(ToolCallArgsEvent::new(&tool_use.id, tool_use.input_json()).into());
        }
        events.push(ToolCallEndEvent::new(&tool_use.id).into());
    }

    /// Nested events come first; the outer result is always the last event
    /// emitted for `result.id`, even when the literal tail is empty.
    fn emit_tool_result(
        &mut self,
        result: &ToolResultBlock,
        message_id: &str,
        events: &mut Vec<AguiEvent>,
    ) {
        let unpacked = unpack_nested(
            &self.config,
            self.depth,
            &result.id,
            &result.output,
            &mut self.message_ids,
        );
        self.warnings.extend(unpacked.warnings);
        events.extend(unpacked.events);
        let result_message_id = self.message_ids.claim(message_id);
        events.push(
            ToolCallResultEvent::new(&result.id, unpacked.literal_tail)
                .with_message_id(result_message_id)
                .into(),
        );
    }
}
