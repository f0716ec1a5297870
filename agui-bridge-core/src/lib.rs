//! # agui-bridge-core
//!
//! The internal execution model consumed by the AG-UI bridge.
//!
//! - **Messages**: [`Message`] and the closed set of [`ContentBlock`] kinds
//! - **Events**: [`Event`], one unit of an agent's execution trace
//! - **Codec**: serialize events to text and probe text for embedded events
//! - **Identifiers**: message/run id generation
//!
//! ## Example
//!
//! ```rust
//! use agui_bridge_core::prelude::*;
//!
//! let call = Event::reasoning(Message::assistant(
//!     ToolUseBlock::new("call-1", "get_weather").with_arg("city", "Paris"),
//! ));
//! let text = serialize_event(&call).unwrap();
//! assert_eq!(try_decode_event(&text), Some(call));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod codec;
pub mod errors;
pub mod events;
pub mod identifier;
pub mod messages;

pub use codec::{serialize_event, try_decode_event};
pub use errors::{CoreError, Result};
pub use events::{Event, EventType};
pub use messages::{
    ContentBlock, Message, Role, TextBlock, ThinkingBlock, ToolResultBlock, ToolUseBlock,
};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::codec::{serialize_event, try_decode_event};
    pub use crate::errors::{CoreError, Result};
    pub use crate::events::{Event, EventType};
    pub use crate::messages::{
        ContentBlock, Message, Role, TextBlock, ThinkingBlock, ToolResultBlock, ToolUseBlock,
    };
}
