//! Message and content types produced by the agent runtime.
//!
//! - **Content**: [`ContentBlock`] and its four block kinds
//! - **Messages**: [`Message`] with an ordered content sequence and a [`Role`]
//!
//! ## Example
//!
//! ```rust
//! use agui_bridge_core::messages::{ContentBlock, Message, ToolUseBlock};
//!
//! let msg = Message::assistant(ContentBlock::thinking("I need data"))
//!     .with_id("msg-1")
//!     .with_block(ToolUseBlock::new("call-1", "search").with_arg("q", "weather"));
//!
//! assert_eq!(msg.tool_uses().count(), 1);
//! ```

pub mod content;
pub mod message;

pub use content::{ContentBlock, TextBlock, ThinkingBlock, ToolResultBlock, ToolUseBlock};
pub use message::{Message, Role};
