//! Message type.

use super::content::{ContentBlock, ToolResultBlock, ToolUseBlock};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role of a message author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// End user.
    User,
    /// The agent.
    #[default]
    Assistant,
    /// Tool output.
    Tool,
    /// System instructions.
    System,
}

impl Role {
    /// Lowercase name as used by the AG-UI protocol.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message with ordered content blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Optional message identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Author role.
    pub role: Role,
    /// Content blocks, in order.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Message {
    /// Create an empty message with the given role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    /// Create an assistant message with a single block.
    #[must_use]
    pub fn assistant(block: impl Into<ContentBlock>) -> Self {
        Self::new(Role::Assistant).with_block(block)
    }

    /// Create a tool message with a single block.
    #[must_use]
    pub fn tool(block: impl Into<ContentBlock>) -> Self {
        Self::new(Role::Tool).with_block(block)
    }

    /// Create a user message holding plain text.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User).with_block(ContentBlock::text(text))
    }

    /// Set the message ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the author name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a content block.
    #[must_use]
    pub fn with_block(mut self, block: impl Into<ContentBlock>) -> Self {
        self.content.push(block.into());
        self
    }

    /// Replace the content.
    #[must_use]
    pub fn with_content(mut self, content: Vec<ContentBlock>) -> Self {
        self.content = content;
        self
    }

    /// Set metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Concatenated text of all text blocks.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect()
    }

    /// Iterate over tool invocations.
    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUseBlock> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::ToolUse(tool_use) => Some(tool_use),
            _ => None,
        })
    }

    /// Iterate over tool results.
    pub fn tool_results(&self) -> impl Iterator<Item = &ToolResultBlock> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::ToolResult(result) => Some(result),
            _ => None,
        })
    }

    /// Check if the message has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
