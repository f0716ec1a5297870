//! Content block types.
//!
//! A message's content is an ordered sequence of [`ContentBlock`]s. The set of
//! block kinds is closed: every consumer matches on all four variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plain text block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The text content.
    pub text: String,
}

impl TextBlock {
    /// Create a new text block.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for TextBlock {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TextBlock {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Reasoning ("thinking") block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThinkingBlock {
    /// The thinking text.
    pub thinking: String,
}

impl ThinkingBlock {
    /// Create a new thinking block.
    #[must_use]
    pub fn new(thinking: impl Into<String>) -> Self {
        Self {
            thinking: thinking.into(),
        }
    }
}

/// Tool invocation block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUseBlock {
    /// Tool call identifier.
    pub id: String,
    /// Name of the tool being invoked.
    pub name: String,
    /// Tool input arguments.
    #[serde(default)]
    pub input: Map<String, Value>,
}

impl ToolUseBlock {
    /// Create a new tool use block with no input.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input: Map::new(),
        }
    }

    /// Set the whole input mapping.
    #[must_use]
    pub fn with_input(mut self, input: Map<String, Value>) -> Self {
        self.input = input;
        self
    }

    /// Add a single input argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Serialize the input as a compact JSON object.
    #[must_use]
    pub fn input_json(&self) -> String {
        Value::Object(self.input.clone()).to_string()
    }
}

/// Tool result block.
///
/// `output` is always held as a sequence; on the wire it may be either a
/// single block object or an array of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultBlock {
    /// Id of the tool call this result answers.
    pub id: String,
    /// Output blocks, in order.
    #[serde(default, deserialize_with = "one_or_many::deserialize")]
    pub output: Vec<ContentBlock>,
}

impl ToolResultBlock {
    /// Create a tool result with the given output blocks.
    #[must_use]
    pub fn new(id: impl Into<String>, output: Vec<ContentBlock>) -> Self {
        Self {
            id: id.into(),
            output,
        }
    }

    /// Create a tool result holding a single text block.
    #[must_use]
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, vec![ContentBlock::text(text)])
    }

    /// Render the output as literal text by concatenating every block's rendering.
    #[must_use]
    pub fn render_output(&self) -> String {
        self.output.iter().map(ContentBlock::render).collect()
    }
}

/// A typed fragment of a message's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text.
    Text(TextBlock),
    /// Reasoning text.
    Thinking(ThinkingBlock),
    /// Tool invocation.
    ToolUse(ToolUseBlock),
    /// Tool result.
    ToolResult(ToolResultBlock),
}

impl ContentBlock {
    /// Create a text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextBlock::new(text))
    }

    /// Create a thinking block.
    #[must_use]
    pub fn thinking(thinking: impl Into<String>) -> Self {
        Self::Thinking(ThinkingBlock::new(thinking))
    }

    /// Create a tool use block.
    #[must_use]
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Map<String, Value>) -> Self {
        Self::ToolUse(ToolUseBlock::new(id, name).with_input(input))
    }

    /// Create a tool result block.
    #[must_use]
    pub fn tool_result(id: impl Into<String>, output: Vec<ContentBlock>) -> Self {
        Self::ToolResult(ToolResultBlock::new(id, output))
    }

    /// Get the block kind as it appears in the `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Thinking(_) => "thinking",
            Self::ToolUse(_) => "tool_use",
            Self::ToolResult(_) => "tool_result",
        }
    }

    /// Get the text if this is a text block.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(block) => Some(&block.text),
            _ => None,
        }
    }

    /// Render the block as literal text.
    ///
    /// Tool invocations render as compact JSON; tool results render their
    /// output recursively.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(block) => block.text.clone(),
            Self::Thinking(block) => block.thinking.clone(),
            Self::ToolUse(block) => serde_json::json!({
                "id": block.id,
                "name": block.name,
                "input": block.input,
            })
            .to_string(),
            Self::ToolResult(block) => block.render_output(),
        }
    }
}

impl From<TextBlock> for ContentBlock {
    fn from(block: TextBlock) -> Self {
        Self::Text(block)
    }
}

impl From<ThinkingBlock> for ContentBlock {
    fn from(block: ThinkingBlock) -> Self {
        Self::Thinking(block)
    }
}

impl From<ToolUseBlock> for ContentBlock {
    fn from(block: ToolUseBlock) -> Self {
        Self::ToolUse(block)
    }
}

impl From<ToolResultBlock> for ContentBlock {
    fn from(block: ToolResultBlock) -> Self {
        Self::ToolResult(block)
    }
}

/// Accepts either a single content block or an array of them.
mod one_or_many {
    use super::ContentBlock;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ContentBlock>),
        One(Box<ContentBlock>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
            Some(OneOrMany::Many(blocks)) => blocks,
            Some(OneOrMany::One(block)) => vec![*block],
            None => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_block_tags() {
        let json = serde_json::to_value(ContentBlock::thinking("hmm")).unwrap();
        assert_eq!(json, json!({"type": "thinking", "thinking": "hmm"}));

        let json = serde_json::to_value(ContentBlock::text("hi")).unwrap();
        assert_eq!(json, json!({"type": "text", "text": "hi"}));
    }

    #[test]
    fn test_tool_result_accepts_single_output() {
        let block: ContentBlock = serde_json::from_value(json!({
            "type": "tool_result",
            "id": "t1",
            "output": {"type": "text", "text": "done"}
        }))
        .unwrap();

        assert_eq!(block, ContentBlock::tool_result("t1", vec![ContentBlock::text("done")]));
    }

    #[test]
    fn test_tool_result_missing_or_null_output_is_empty() {
        let missing: ToolResultBlock = serde_json::from_value(json!({"id": "t1"})).unwrap();
        assert!(missing.output.is_empty());

        let null: ToolResultBlock =
            serde_json::from_value(json!({"id": "t1", "output": null})).unwrap();
        assert!(null.output.is_empty());
    }

    #[test]
    fn test_render() {
        let tool_use = ContentBlock::ToolUse(ToolUseBlock::new("c1", "search").with_arg("q", "rust"));
        assert_eq!(
            tool_use.render(),
            r#"{"id":"c1","input":{"q":"rust"},"name":"search"}"#
        );

        let nested = ContentBlock::tool_result(
            "c1",
            vec![ContentBlock::text("a"), ContentBlock::thinking("b")],
        );
        assert_eq!(nested.render(), "ab");
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let result: Result<ContentBlock, _> =
            serde_json::from_value(json!({"type": "image", "url": "x"}));
        assert!(result.is_err());
    }
}
