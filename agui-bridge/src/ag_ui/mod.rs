//! AG-UI protocol bridge.
//!
//! This module turns an agent's internal execution trace into the AG-UI
//! (Agent-User Interaction) event stream a frontend consumes.
//!
//! # Overview
//!
//! - **Run lifecycle**: `RUN_STARTED`, `RUN_FINISHED`, `RUN_ERROR`
//! - **Text messages**: streaming text with start/content/end events
//! - **Thinking**: surfaced as text, as thinking events, or dropped
//! - **Tool calls**: start/args/end/result lifecycle
//! - **Nested agents**: a tool result holding a sub-agent's serialized trace
//!   is expanded into the sub-agent's own events, ahead of the enclosing
//!   tool call's result
//! - **State**: the run input's state as a snapshot
//!
//! # Example
//!
//! ```ignore
//! use agui_bridge::ag_ui::{AdapterConfig, AguiAdapter, EventStream, RunInput};
//! use futures::StreamExt;
//!
//! let adapter = AguiAdapter::new(
//!     |input: &RunInput| -> EventStream { agent.run_stream(input) },
//!     AdapterConfig::new().max_unpack_depth(4),
//! );
//!
//! let mut run = adapter.run(RunInput::new("thread-123", "run-456"));
//! while let Some(event) = run.next().await {
//!     send(event.encode()?);
//! }
//! ```

mod config;
mod error;
mod input;
mod stream;
mod translator;
mod types;
mod unpack;

pub use config::{AdapterConfig, LiteralJoin, ThinkingMode, DEFAULT_MAX_UNPACK_DEPTH};
pub use error::{RunWarning, SourceError};
pub use input::RunInput;
pub use stream::{AguiAdapter, AguiRunStream, EventSource, EventStream, RunOutput, RunStreamState};
pub use translator::{RunPhase, Translator};
pub use types::{
    AguiEvent,
    EventType,
    // Run lifecycle
    RunErrorEvent,
    RunFinishedEvent,
    RunStartedEvent,
    // State
    StateSnapshotEvent,
    // Text messages
    TextMessageContentEvent,
    TextMessageEndEvent,
    TextMessageStartEvent,
    // Thinking
    ThinkingEndEvent,
    ThinkingStartEvent,
    ThinkingTextMessageContentEvent,
    ThinkingTextMessageEndEvent,
    ThinkingTextMessageStartEvent,
    // Tool calls
    ToolCallArgsEvent,
    ToolCallEndEvent,
    ToolCallResultEvent,
    ToolCallStartEvent,
};
pub use unpack::{unpack, Unpacked};
