//! Nested trace unpacking.
//!
//! When an agent is used as a tool, its whole execution is returned as the
//! tool's output: one text block per serialized [`Event`](agui_bridge_core::Event),
//! followed by the sub-agent's final answer as plain text. [`unpack`]
//! classifies each output block on its own, translates the decodable ones
//! through a child [`Translator`] and collects the rest as literal text.
//!
//! Decodable blocks may appear anywhere in the output. Decoded events keep
//! their relative order, and so do the literal pieces.

use super::config::AdapterConfig;
use super::error::RunWarning;
use super::translator::{MessageIds, Translator};
use super::types::AguiEvent;
use agui_bridge_core::codec::try_decode_event;
use agui_bridge_core::ContentBlock;
use std::sync::Arc;

/// Result of unpacking a tool result's output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unpacked {
    /// Protocol events produced by the nested trace, in order.
    pub events: Vec<AguiEvent>,
    /// Literal (non-decodable) output, joined.
    pub literal_tail: String,
    /// Warnings raised while unpacking, including those of nested runs.
    pub warnings: Vec<RunWarning>,
}

impl Unpacked {
    /// Whether any nested events were produced.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Unpack the output of the tool result `tool_call_id`, found at translator
/// depth `depth`.
///
/// Decoded events are translated at `depth + 1`. A decodable block that would
/// exceed `config.max_unpack_depth` is demoted to literal text and reported
/// as [`RunWarning::UnpackDepthExceeded`]; the rest of the output is still
/// unpacked normally.
pub fn unpack(
    config: &Arc<AdapterConfig>,
    depth: usize,
    tool_call_id: &str,
    output: &[ContentBlock],
) -> Unpacked {
    unpack_nested(config, depth, tool_call_id, output, &mut MessageIds::default())
}

/// [`unpack`] within a run whose protocol message ids are `message_ids`.
pub(crate) fn unpack_nested(
    config: &Arc<AdapterConfig>,
    depth: usize,
    tool_call_id: &str,
    output: &[ContentBlock],
    message_ids: &mut MessageIds,
) -> Unpacked {
    let mut unpacked = Unpacked::default();
    let mut literals = Vec::new();
    let mut nested: Option<Translator> = None;
    let mut depth_exceeded = false;

    for block in output {
        let decoded = match block {
            ContentBlock::Text(text) => try_decode_event(&text.text),
            _ => None,
        };

        match decoded {
            Some(event) if depth < config.max_unpack_depth => {
                let child = nested.get_or_insert_with(|| {
                    Translator::nested(Arc::clone(config), depth + 1, std::mem::take(message_ids))
                });
                unpacked.events.extend(child.translate(&event));
            }
            Some(_) => {
                depth_exceeded = true;
                literals.push(block.render());
            }
            None => literals.push(block.render()),
        }
    }

    if let Some(mut child) = nested {
        unpacked.warnings.extend(child.drain_warnings());
        let (events, ids) = child.finish_nested();
        unpacked.events.extend(events);
        *message_ids = ids;
        tracing::debug!(
            tool_call_id,
            depth = depth + 1,
            events = unpacked.events.len(),
            "unpacked nested trace"
        );
    }

    if depth_exceeded {
        let warning = RunWarning::UnpackDepthExceeded {
            tool_call_id: tool_call_id.to_string(),
            depth: config.max_unpack_depth,
        };
        tracing::warn!(tool_call_id, depth, %warning, "nested trace kept as literal");
        unpacked.warnings.push(warning);
    }

    unpacked.literal_tail = config.literal_join.join(&literals);
    unpacked
}
