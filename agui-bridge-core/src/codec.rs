//! Trace codec.
//!
//! A sub-agent's execution trace is embedded in a tool result as a sequence
//! of text blocks, each holding one serialized [`Event`]. [`serialize_event`]
//! is the producer side; [`try_decode_event`] is the probe used when
//! unpacking such traces.
//!
//! ```rust
//! use agui_bridge_core::codec::{serialize_event, try_decode_event};
//! use agui_bridge_core::{ContentBlock, Event, Message};
//!
//! let event = Event::reasoning(Message::assistant(ContentBlock::thinking("I need data")));
//! let text = serialize_event(&event).unwrap();
//!
//! assert_eq!(try_decode_event(&text), Some(event));
//! assert_eq!(try_decode_event("The weather is sunny."), None);
//! ```

use crate::errors::{CoreError, Result};
use crate::events::Event;

/// Serialize an event to its text form.
///
/// # Errors
///
/// Returns [`CoreError::Serialization`] if the event cannot be encoded.
pub fn serialize_event(event: &Event) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

/// Decode an event from its text form.
///
/// # Errors
///
/// Returns [`CoreError::InvalidEvent`] when the text is not a JSON object and
/// [`CoreError::Serialization`] when it does not match the event schema.
pub fn deserialize_event(text: &str) -> Result<Event> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with('{') {
        return Err(CoreError::InvalidEvent("not a JSON object".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Attempt to decode `text` as a serialized event.
///
/// Returns `None` for anything that is not a structurally valid event,
/// including prose and unrelated JSON. Never fails otherwise.
#[must_use]
pub fn try_decode_event(text: &str) -> Option<Event> {
    match deserialize_event(text) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::trace!(error = %err, "text is not a serialized event");
            None
        }
    }
}
