//! Run input.

use agui_bridge_core::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input for a single AG-UI run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    /// Thread identifier.
    pub thread_id: String,
    /// Run identifier.
    pub run_id: String,
    /// Conversation so far.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Client-side state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Properties forwarded verbatim from the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_props: Option<Value>,
}

impl RunInput {
    /// Create an input with no messages.
    pub fn new(thread_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
            messages: Vec::new(),
            state: None,
            forwarded_props: None,
        }
    }

    /// Set the messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Append a message.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the client state.
    #[must_use]
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the forwarded properties.
    #[must_use]
    pub fn with_forwarded_props(mut self, props: Value) -> Self {
        self.forwarded_props = Some(props);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_wire_shape() {
        let input = RunInput::new("t1", "r1")
            .with_message(Message::user("Go").with_id("m1"))
            .with_state(json!({"step": 1}))
            .with_forwarded_props(json!({"locale": "en"}));

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["threadId"], "t1");
        assert_eq!(value["runId"], "r1");
        assert_eq!(value["messages"][0]["id"], "m1");
        assert_eq!(value["state"]["step"], 1);
        assert_eq!(value["forwardedProps"]["locale"], "en");
    }

    #[test]
    fn test_messages_default_to_empty() {
        let input: RunInput = serde_json::from_value(json!({"threadId": "t", "runId": "r"})).unwrap();
        assert!(input.messages.is_empty());
        assert!(input.state.is_none());
        assert!(input.forwarded_props.is_none());
    }
}
