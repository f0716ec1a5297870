//! AG-UI run orchestration.
//!
//! [`AguiAdapter`] binds an upstream [`EventSource`] to a configuration;
//! [`AguiAdapter::run`] returns an [`AguiRunStream`], a lazy single-pass
//! stream of protocol events for one run:
//!
//! ```text
//! RUN_STARTED → [STATE_SNAPSHOT] → translated events* → framing end → RUN_FINISHED
//! ```
//!
//! An upstream failure closes the open framing and ends the stream with
//! `RUN_ERROR` instead of `RUN_FINISHED`. Cancelling the run stops
//! consumption of the upstream source and ends the stream with no further
//! events.

use super::config::AdapterConfig;
use super::error::{RunWarning, SourceError};
use super::input::RunInput;
use super::translator::Translator;
use super::types::*;
use agui_bridge_core::Event;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::time::Sleep;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{debug, error};

/// Stream of internal events produced by the agent runtime.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event, SourceError>> + Send>>;

/// Producer of internal events for a run.
pub trait EventSource: Send + Sync {
    /// Start producing events for `input`.
    fn stream(&self, input: &RunInput) -> EventStream;
}

impl<F> EventSource for F
where
    F: Fn(&RunInput) -> EventStream + Send + Sync,
{
    fn stream(&self, input: &RunInput) -> EventStream {
        self(input)
    }
}

/// Adapter exposing an event source as AG-UI runs.
///
/// # Example
///
/// ```ignore
/// use agui_bridge::ag_ui::{AdapterConfig, AguiAdapter, RunInput};
/// use futures::StreamExt;
///
/// let adapter = AguiAdapter::new(agent_source, AdapterConfig::default());
/// let mut run = adapter.run(RunInput::new("thread-1", "run-1"));
///
/// while let Some(event) = run.next().await {
///     send(event.encode()?);
/// }
/// ```
#[derive(Clone)]
pub struct AguiAdapter {
    source: Arc<dyn EventSource>,
    config: Arc<AdapterConfig>,
}

impl AguiAdapter {
    /// Create a new adapter.
    pub fn new(source: impl EventSource + 'static, config: AdapterConfig) -> Self {
        Self::from_arc(Arc::new(source), config)
    }

    /// Create a new adapter from a shared source.
    pub fn from_arc(source: Arc<dyn EventSource>, config: AdapterConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Start a run.
    ///
    /// Nothing is emitted until the returned stream is polled.
    pub fn run(&self, input: RunInput) -> AguiRunStream {
        let inner = self.source.stream(&input);
        AguiRunStream::new(inner, input, Arc::clone(&self.config))
    }
}

/// State of a run stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStreamState {
    /// Not polled yet.
    Pending,
    /// Consuming the upstream source.
    Streaming,
    /// Finished, failed or cancelled; only buffered events remain.
    Done,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    /// Protocol events, in order.
    pub events: Vec<AguiEvent>,
    /// Warnings surfaced during the run.
    pub warnings: Vec<RunWarning>,
}

/// Protocol event stream for a single run.
pub struct AguiRunStream {
    inner: Option<EventStream>,
    thread_id: String,
    run_id: String,
    initial_state: Option<serde_json::Value>,
    config: Arc<AdapterConfig>,
    state: RunStreamState,
    translator: Option<Translator>,
    pending: VecDeque<AguiEvent>,
    warnings: Vec<RunWarning>,
    cancel: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl AguiRunStream {
    /// Create a run stream over `inner`.
    pub fn new(inner: EventStream, input: RunInput, config: Arc<AdapterConfig>) -> Self {
        let cancel = CancellationToken::new();
        Self {
            inner: Some(inner),
            thread_id: input.thread_id,
            run_id: input.run_id,
            initial_state: input.state,
            translator: Some(Translator::new(Arc::clone(&config))),
            config,
            state: RunStreamState::Pending,
            pending: VecDeque::new(),
            warnings: Vec::new(),
            cancelled: Box::pin(cancel.clone().cancelled_owned()),
            cancel,
            deadline: None,
        }
    }

    /// Get the thread ID.
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    /// Get the run ID.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the current state.
    pub fn state(&self) -> RunStreamState {
        self.state
    }

    /// Warnings surfaced so far.
    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }

    /// Token that cancels this run when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the run.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drive the run to completion, collecting events and warnings.
    pub async fn into_output(mut self) -> RunOutput {
        let mut events = Vec::new();
        while let Some(event) = self.next().await {
            events.push(event);
        }
        RunOutput {
            events,
            warnings: self.warnings,
        }
    }

    fn start(&mut self) {
        self.state = RunStreamState::Streaming;
        debug!(thread_id = %self.thread_id, run_id = %self.run_id, "run started");

        self.pending
            .push_back(RunStartedEvent::new(&self.thread_id, &self.run_id).into());
        if self.config.emit_state_snapshot {
            if let Some(state) = self.initial_state.take() {
                self.pending.push_back(StateSnapshotEvent::new(state).into());
            }
        }
        if let Some(timeout) = self.config.run_timeout {
            self.deadline = Some(Box::pin(tokio::time::sleep(timeout)));
        }
    }

    fn translate(&mut self, event: Event) {
        let Some(translator) = self.translator.as_mut() else {
            return;
        };
        self.pending.extend(translator.translate(&event));
        self.warnings.extend(translator.drain_warnings());
    }

    fn finish(&mut self) {
        if let Some(translator) = self.translator.take() {
            self.pending.extend(translator.finish());
        }
        self.pending
            .push_back(RunFinishedEvent::new(&self.thread_id, &self.run_id).into());
        self.end();
        debug!(run_id = %self.run_id, "run finished");
    }

    fn fail(&mut self, err: SourceError) {
        error!(run_id = %self.run_id, error = %err, "run failed");
        if let Some(translator) = self.translator.take() {
            self.pending.extend(translator.finish());
        }
        self.pending
            .push_back(RunErrorEvent::new(err.to_string()).with_code(err.code()).into());
        self.end();
    }

    fn end(&mut self) {
        self.inner = None;
        self.deadline = None;
        self.state = RunStreamState::Done;
    }
}

impl Stream for AguiRunStream {
    type Item = AguiEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.state != RunStreamState::Done && this.cancelled.as_mut().poll(cx).is_ready() {
                debug!(run_id = %this.run_id, "run cancelled");
                this.end();
                this.translator = None;
                this.pending.clear();
                return Poll::Ready(None);
            }

            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }

            match this.state {
                RunStreamState::Pending => {
                    this.start();
                    continue;
                }
                RunStreamState::Done => return Poll::Ready(None),
                RunStreamState::Streaming => {}
            }

            if let Some(deadline) = this.deadline.as_mut() {
                if deadline.as_mut().poll(cx).is_ready() {
                    let timeout = this.config.run_timeout.unwrap_or_default();
                    this.fail(SourceError::Timeout(timeout));
                    continue;
                }
            }

            let Some(inner) = this.inner.as_mut() else {
                this.finish();
                continue;
            };

            match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(event))) => this.translate(event),
                Poll::Ready(Some(Err(err))) => this.fail(err),
                Poll::Ready(None) => this.finish(),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agui_bridge_core::codec::serialize_event;
    use agui_bridge_core::{ContentBlock, EventType as InternalEventType, Message, ToolUseBlock};
    use futures::stream;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    fn source_of(events: Vec<Result<Event, SourceError>>) -> impl EventSource {
        move |_: &RunInput| -> EventStream { Box::pin(stream::iter(events.clone())) }
    }

    fn adapter(events: Vec<Result<Event, SourceError>>) -> AguiAdapter {
        AguiAdapter::new(source_of(events), AdapterConfig::default())
    }

    fn input() -> RunInput {
        RunInput::new("t1", "r1").with_message(Message::user("Go").with_id("m1"))
    }

    fn types(events: &[AguiEvent]) -> Vec<EventType> {
        events.iter().map(AguiEvent::event_type).collect()
    }

    fn encoded(event: &Event) -> ContentBlock {
        ContentBlock::text(serialize_event(event).unwrap())
    }

    #[tokio::test]
    async fn test_empty_source_brackets_run() {
        let output = adapter(vec![]).run(input()).into_output().await;

        assert_eq!(types(&output.events), vec![EventType::RunStarted, EventType::RunFinished]);
        match (&output.events[0], &output.events[1]) {
            (AguiEvent::RunStarted(start), AguiEvent::RunFinished(end)) => {
                assert_eq!((start.thread_id.as_str(), start.run_id.as_str()), ("t1", "r1"));
                assert_eq!((end.thread_id.as_str(), end.run_id.as_str()), ("t1", "r1"));
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_text_run_lifecycle() {
        let events = vec![
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("Hello")).with_id("a1"))),
            Ok(Event::reasoning(Message::assistant(ContentBlock::text(" World")).with_id("a1"))),
        ];
        let output = adapter(events).run(input()).into_output().await;

        assert_eq!(
            types(&output.events),
            vec![
                EventType::RunStarted,
                EventType::TextMessageStart,
                EventType::TextMessageContent,
                EventType::TextMessageContent,
                EventType::TextMessageEnd,
                EventType::RunFinished,
            ]
        );
    }

    #[tokio::test]
    async fn test_nested_agent_tool_result_run() {
        let thinking = Event::reasoning(Message::assistant(ContentBlock::thinking("I need data")));
        let tool_use = Event::reasoning(Message::assistant(
            ToolUseBlock::new("inner-tc-1", "inner_tool").with_arg("q", "query"),
        ));
        let inner_result = Event::tool_result(Message::tool(ContentBlock::tool_result(
            "inner-tc-1",
            vec![ContentBlock::text("tool_output")],
        )));
        let outer = Event::new(
            InternalEventType::ToolResult,
            Message::tool(ContentBlock::tool_result(
                "outer-tc-1",
                vec![
                    encoded(&thinking),
                    encoded(&tool_use),
                    encoded(&inner_result),
                    ContentBlock::text("Final inner answer"),
                ],
            ))
            .with_id("msg-tr1"),
            true,
        );

        let output = adapter(vec![Ok(outer)]).run(input()).into_output().await;
        let events = &output.events;

        let thinking_pos = events
            .iter()
            .position(|e| matches!(e, AguiEvent::TextMessageContent(c) if c.delta.contains("I need data")))
            .expect("inner thinking surfaced as text");
        let inner_start_pos = events
            .iter()
            .position(|e| matches!(e, AguiEvent::ToolCallStart(s) if s.tool_call_id == "inner-tc-1"))
            .expect("inner tool call start");
        let inner_result_pos = events
            .iter()
            .position(|e| matches!(e, AguiEvent::ToolCallResult(r) if r.tool_call_id == "inner-tc-1" && r.content.contains("tool_output")))
            .expect("inner tool result");
        let outer_result_pos = events
            .iter()
            .position(|e| matches!(e, AguiEvent::ToolCallResult(r) if r.tool_call_id == "outer-tc-1" && r.content.contains("Final inner answer")))
            .expect("outer tool result");

        assert!(thinking_pos < inner_start_pos);
        assert!(inner_start_pos < inner_result_pos);
        assert!(inner_result_pos < outer_result_pos);

        let last_tool_event = events.iter().rev().find(|e| e.is_tool_call()).unwrap();
        assert_eq!(last_tool_event.tool_call_id(), Some("outer-tc-1"));
        assert_eq!(events.last().map(AguiEvent::event_type), Some(EventType::RunFinished));
        assert!(output.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_final_event_warns_once_and_keeps_streaming() {
        let events = vec![
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("first")).with_id("a1")).finalized()),
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("second")).with_id("a2")).finalized()),
        ];
        let output = adapter(events).run(input()).into_output().await;

        let deltas: Vec<&str> = output
            .events
            .iter()
            .filter_map(|e| match e {
                AguiEvent::TextMessageContent(c) => Some(c.delta.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(deltas, vec!["first", "second"]);
        assert_eq!(output.warnings, vec![RunWarning::DuplicateFinalEvent { occurrence: 2 }]);
        assert_eq!(
            output.events.last().map(AguiEvent::event_type),
            Some(EventType::RunFinished)
        );
    }

    #[tokio::test]
    async fn test_text_message_ids_unique_within_run() {
        let turn = Message::assistant(ContentBlock::text("Checking"))
            .with_id("m1")
            .with_block(ToolUseBlock::new("c1", "lookup"))
            .with_block(ContentBlock::text("Done"));
        let events = vec![
            Ok(Event::reasoning(turn)),
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("Bye")).with_id("m1")).finalized()),
        ];
        let output = adapter(events).run(input()).into_output().await;

        let starts: Vec<&str> = output
            .events
            .iter()
            .filter_map(|e| match e {
                AguiEvent::TextMessageStart(start) => Some(start.message_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec!["m1", "m1-1"]);

        let deltas: Vec<(&str, &str)> = output
            .events
            .iter()
            .filter_map(|e| match e {
                AguiEvent::TextMessageContent(c) => Some((c.message_id.as_str(), c.delta.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(deltas, vec![("m1", "Checking"), ("m1-1", "Done"), ("m1-1", "Bye")]);
    }

    #[tokio::test]
    async fn test_empty_tool_output_run() {
        let events = vec![Ok(Event::tool_result(Message::tool(ContentBlock::tool_result(
            "t1",
            vec![],
        ))))];
        let output = adapter(events).run(input()).into_output().await;

        assert_eq!(
            types(&output.events),
            vec![EventType::RunStarted, EventType::ToolCallResult, EventType::RunFinished]
        );
        match &output.events[1] {
            AguiEvent::ToolCallResult(r) => assert_eq!(r.content, ""),
            other => panic!("expected ToolCallResult, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_source_failure_ends_with_run_error() {
        let events = vec![
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("partial")).with_id("a1"))),
            Err(SourceError::agent("model unavailable")),
            Ok(Event::reasoning(Message::assistant(ContentBlock::text("never")))),
        ];
        let output = adapter(events).run(input()).into_output().await;

        assert_eq!(
            types(&output.events),
            vec![
                EventType::RunStarted,
                EventType::TextMessageStart,
                EventType::TextMessageContent,
                EventType::TextMessageEnd,
                EventType::RunError,
            ]
        );
        match output.events.last() {
            Some(AguiEvent::RunError(err)) => {
                assert_eq!(err.message, "Agent error: model unavailable");
                assert_eq!(err.code.as_deref(), Some("AGENT_ERROR"));
            }
            other => panic!("expected RunError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_state_snapshot_follows_run_started() {
        let output = adapter(vec![])
            .run(input().with_state(json!({"count": 1})))
            .into_output()
            .await;

        assert_eq!(
            types(&output.events),
            vec![EventType::RunStarted, EventType::StateSnapshot, EventType::RunFinished]
        );
    }

    #[tokio::test]
    async fn test_cancellation_stops_emission() {
        let source = |_: &RunInput| -> EventStream {
            let first = stream::iter(vec![Ok(Event::reasoning(Message::assistant(
                ContentBlock::text("hello"),
            )))]);
            Box::pin(first.chain(stream::pending::<Result<Event, SourceError>>()))
        };
        let adapter = AguiAdapter::new(source, AdapterConfig::default());
        let mut run = adapter.run(input());
        let token = run.cancellation_token();

        assert_eq!(run.next().await.map(|e| e.event_type()), Some(EventType::RunStarted));
        assert_eq!(run.next().await.map(|e| e.event_type()), Some(EventType::TextMessageStart));

        token.cancel();
        assert!(run.next().await.is_none());
        assert_eq!(run.state(), RunStreamState::Done);
        assert!(run.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_wakes_pending_run() {
        let source = |_: &RunInput| -> EventStream {
            Box::pin(stream::pending::<Result<Event, SourceError>>())
        };
        let adapter = AguiAdapter::new(source, AdapterConfig::default());
        let mut run = adapter.run(input());
        let token = run.cancellation_token();

        assert!(run.next().await.is_some());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        assert!(run.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_timeout() {
        let source = |_: &RunInput| -> EventStream {
            Box::pin(stream::pending::<Result<Event, SourceError>>())
        };
        let config = AdapterConfig::new().run_timeout(Duration::from_secs(5));
        let output = AguiAdapter::new(source, config).run(input()).into_output().await;

        assert_eq!(types(&output.events), vec![EventType::RunStarted, EventType::RunError]);
        match &output.events[1] {
            AguiEvent::RunError(err) => assert_eq!(err.code.as_deref(), Some("TIMEOUT")),
            other => panic!("expected RunError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let adapter = adapter(vec![Ok(Event::reasoning(
            Message::assistant(ContentBlock::text("hi")).with_id("a1"),
        )
        .finalized())]);

        let (a, b) = tokio::join!(
            adapter.run(RunInput::new("t1", "r1")).into_output(),
            adapter.run(RunInput::new("t2", "r2")).into_output(),
        );

        assert_eq!(types(&a.events), types(&b.events));
        assert!(a.warnings.is_empty() && b.warnings.is_empty());
        match (&a.events[0], &b.events[0]) {
            (AguiEvent::RunStarted(x), AguiEvent::RunStarted(y)) => {
                assert_eq!(x.run_id, "r1");
                assert_eq!(y.run_id, "r2");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }
}
