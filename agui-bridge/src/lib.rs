//! AG-UI bridge for agent execution traces.
//!
//! This crate adapts the internal event stream of an agent runtime (see
//! [`agui_bridge_core`]) to the AG-UI protocol:
//!
//! - **[`ag_ui::Translator`]**: stateful per-run mapping of internal events to
//!   protocol events
//! - **[`ag_ui::unpack`]**: expansion of sub-agent traces embedded in tool
//!   results
//! - **[`ag_ui::AguiAdapter`]**: lazy, cancellable run stream bracketed by
//!   `RUN_STARTED` and `RUN_FINISHED`
//!
//! # Example
//!
//! ```rust
//! use agui_bridge::ag_ui::{AdapterConfig, AguiAdapter, AguiEvent, EventStream, RunInput};
//! use agui_bridge_core::{ContentBlock, Event, Message};
//! use futures::{stream, StreamExt};
//!
//! # tokio_test::block_on(async {
//! let adapter = AguiAdapter::new(
//!     |_: &RunInput| -> EventStream {
//!         let answer = Event::reasoning(Message::assistant(ContentBlock::text("Hello")));
//!         Box::pin(stream::iter(vec![Ok(answer.finalized())]))
//!     },
//!     AdapterConfig::default(),
//! );
//!
//! let events: Vec<AguiEvent> = adapter.run(RunInput::new("t1", "r1")).collect().await;
//! assert_eq!(events.len(), 5);
//! # });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod ag_ui;

pub use ag_ui::{AdapterConfig, AguiAdapter, AguiEvent, AguiRunStream, RunInput, Translator};
