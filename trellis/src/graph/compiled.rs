//! Compiled workflow: immutable, supports invoke, resume, and stream.
//!
//! Built by [`Workflow::compile`](super::Workflow::compile). Holds the node
//! map, the entry node, and the declared-edge table. Execution is a
//! single-threaded cooperative loop: one node at a time, the returned
//! [`Transition`] honored even when it contradicts declared edges.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::FlowError;

use super::config_error::ConfigError;
use super::logging::{log_run_complete, log_run_error, log_run_start, log_step, log_transition};
use super::node::Node;
use super::transition::{InputRequest, Transition};
use super::workflow::END;

/// Outcome of [`CompiledWorkflow::invoke`] or [`CompiledWorkflow::resume`].
///
/// A run either reaches the terminal marker or pauses for external input.
/// Suspension is a tagged result, not an error: the run loop owns the
/// blocking read, node functions stay pure.
#[derive(Debug)]
pub enum RunOutcome<S> {
    /// The run reached `Transition::End`, an edge to `END`, or ran past the
    /// last declared edge.
    Finished(S),
    /// A node requested external input. Write the input into `state` and pass
    /// `request.resume` to [`CompiledWorkflow::resume`] to continue the run
    /// with the same state record.
    Suspended {
        /// State at the suspension point, side effects applied.
        state: S,
        /// What the suspending node asked for.
        request: InputRequest,
    },
}

/// One event from [`CompiledWorkflow::stream`].
///
/// The stream is lazy, finite, and not restartable once consumed: one
/// [`Step`](RunEvent::Step) per executed node, then optionally a terminal
/// `Suspended` or `Failed` event.
#[derive(Debug)]
pub enum RunEvent<S> {
    /// State snapshot after one node executed.
    Step {
        /// Name the node was registered under.
        node: String,
        /// State with that node's update applied.
        state: S,
    },
    /// The run paused for external input after the last emitted step.
    Suspended {
        /// What the suspending node asked for.
        request: InputRequest,
    },
    /// The run failed. Prior `Step` events already show the applied side
    /// effects; there is no rollback.
    Failed(FlowError),
}

/// Executable workflow: immutable structure, shared node map.
///
/// Created by [`Workflow::compile`](super::Workflow::compile). Runs from the
/// entry node; after each node, the returned [`Transition`] selects the next
/// node, `Continue` falling back to the declared edge table. Cloning is
/// cheap (nodes are shared via `Arc`).
#[derive(Clone)]
pub struct CompiledWorkflow<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) entry: String,
    /// Declared next node per source; resolves `Transition::Continue`.
    pub(super) next_map: HashMap<String, String>,
    pub(super) step_limit: Option<usize>,
}

impl<S> CompiledWorkflow<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Name of the entry node.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Runs the workflow from the entry node.
    ///
    /// Returns [`RunOutcome::Finished`] with the final state, or
    /// [`RunOutcome::Suspended`] when a node requests external input.
    /// Configuration and external-call errors abort the run; side effects of
    /// already-executed nodes are not rolled back.
    pub async fn invoke(&self, state: S) -> Result<RunOutcome<S>, FlowError> {
        self.run_from(self.entry.clone(), state, None).await
    }

    /// Re-enters the run loop at `node` with the caller-updated state.
    ///
    /// This is the second half of the cooperative suspension point: after
    /// [`RunOutcome::Suspended`], supply the requested input through the
    /// state and resume at `request.resume`.
    pub async fn resume(&self, state: S, node: impl Into<String>) -> Result<RunOutcome<S>, FlowError> {
        let node = node.into();
        if !self.nodes.contains_key(&node) {
            return Err(ConfigError::UnknownNode(node).into());
        }
        self.run_from(node, state, None).await
    }

    /// Runs the workflow, emitting one [`RunEvent::Step`] per executed node.
    ///
    /// The returned stream is finite and not restartable. A suspension or
    /// failure appends a final `Suspended` or `Failed` event; normal
    /// completion simply ends the stream after the last step.
    pub fn stream(&self, state: S) -> ReceiverStream<RunEvent<S>> {
        let (tx, rx) = mpsc::channel(64);
        let workflow = self.clone();
        tokio::spawn(async move {
            let entry = workflow.entry.clone();
            match workflow.run_from(entry, state, Some(&tx)).await {
                Ok(RunOutcome::Finished(_)) => {}
                Ok(RunOutcome::Suspended { request, .. }) => {
                    let _ = tx.send(RunEvent::Suspended { request }).await;
                }
                Err(e) => {
                    let _ = tx.send(RunEvent::Failed(e)).await;
                }
            }
        });
        ReceiverStream::new(rx)
    }

    /// Shared run loop behind invoke, resume, and stream.
    async fn run_from(
        &self,
        start: String,
        mut state: S,
        step_tx: Option<&mpsc::Sender<RunEvent<S>>>,
    ) -> Result<RunOutcome<S>, FlowError> {
        log_run_start(&start);
        let mut current = start;
        let mut steps = 0usize;

        loop {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    let err = FlowError::StepLimitExceeded(limit);
                    log_run_error(&err);
                    return Err(err);
                }
            }

            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| ConfigError::UnknownNode(current.clone()))?
                .clone();
            log_step(&current, &state);

            let (new_state, transition) = match node.run(state).await {
                Ok(out) => out,
                Err(e) => {
                    log_run_error(&e);
                    return Err(e);
                }
            };
            state = new_state;
            steps += 1;
            log_transition(&current, &transition);

            if let Some(tx) = step_tx {
                let _ = tx
                    .send(RunEvent::Step {
                        node: current.clone(),
                        state: state.clone(),
                    })
                    .await;
            }

            match transition {
                Transition::End => break,
                Transition::Continue => match self.next_map.get(&current) {
                    None => break,
                    Some(to) if to == END => break,
                    Some(to) => current = to.clone(),
                },
                Transition::Goto(to) => {
                    if to == END {
                        break;
                    }
                    if !self.nodes.contains_key(&to) {
                        let err: FlowError =
                            ConfigError::UnknownTransition { from: current, to }.into();
                        log_run_error(&err);
                        return Err(err);
                    }
                    current = to;
                }
                Transition::AwaitInput(request) => {
                    if !self.nodes.contains_key(&request.resume) {
                        let err: FlowError = ConfigError::UnknownTransition {
                            from: current,
                            to: request.resume,
                        }
                        .into();
                        log_run_error(&err);
                        return Err(err);
                    }
                    log_run_complete(steps);
                    return Ok(RunOutcome::Suspended { state, request });
                }
            }
        }

        log_run_complete(steps);
        Ok(RunOutcome::Finished(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio_stream::StreamExt;

    use crate::graph::{FnNode, Workflow};

    fn add_node(delta: i32, transition: Transition) -> Arc<dyn Node<i32>> {
        Arc::new(FnNode::new(move |state: i32| {
            let transition = transition.clone();
            async move { Ok((state + delta, transition)) }
        }))
    }

    fn two_step_workflow() -> CompiledWorkflow<i32> {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node("first", add_node(1, Transition::Continue))
            .unwrap();
        workflow
            .add_node("second", add_node(2, Transition::Continue))
            .unwrap();
        workflow
            .add_edge("first", "second")
            .add_edge("second", END)
            .set_entry("first");
        workflow.compile().expect("workflow compiles")
    }

    fn unwrap_finished(outcome: RunOutcome<i32>) -> i32 {
        match outcome {
            RunOutcome::Finished(state) => state,
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    /// **Scenario**: Linear two-step run visits nodes in declared order.
    #[tokio::test]
    async fn invoke_linear_chain() {
        let workflow = two_step_workflow();
        assert_eq!(unwrap_finished(workflow.invoke(0).await.unwrap()), 3);
    }

    /// **Scenario**: Continue with no declared outgoing edge ends the run.
    #[tokio::test]
    async fn invoke_continue_without_edge_finishes() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node("only", add_node(5, Transition::Continue))
            .unwrap();
        workflow.set_entry("only");
        let compiled = workflow.compile().unwrap();
        assert_eq!(unwrap_finished(compiled.invoke(0).await.unwrap()), 5);
    }

    /// **Scenario**: Goto jumps over the declared edge order.
    #[tokio::test]
    async fn invoke_goto_skips_declared_edge() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node("first", add_node(1, Transition::Goto("third".to_string())))
            .unwrap();
        workflow
            .add_node("second", add_node(10, Transition::Continue))
            .unwrap();
        workflow
            .add_node("third", add_node(100, Transition::End))
            .unwrap();
        workflow
            .add_edge("first", "second")
            .add_edge("second", "third")
            .add_edge("third", END)
            .set_entry("first");
        let compiled = workflow.compile().unwrap();
        // first: 0+1=1, jumps to third: 1+100=101 (second skipped).
        assert_eq!(unwrap_finished(compiled.invoke(0).await.unwrap()), 101);
    }

    /// **Scenario**: Goto to END finishes the run.
    #[tokio::test]
    async fn invoke_goto_end_finishes() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node("only", add_node(7, Transition::Goto(END.to_string())))
            .unwrap();
        workflow.set_entry("only");
        let compiled = workflow.compile().unwrap();
        assert_eq!(unwrap_finished(compiled.invoke(0).await.unwrap()), 7);
    }

    /// **Scenario**: Goto to an unregistered node fails with UnknownTransition.
    #[tokio::test]
    async fn invoke_goto_unknown_node_fails() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node(
                "first",
                add_node(1, Transition::Goto("nowhere".to_string())),
            )
            .unwrap();
        workflow.set_entry("first");
        let compiled = workflow.compile().unwrap();
        match compiled.invoke(0).await {
            Err(FlowError::Config(ConfigError::UnknownTransition { from, to })) => {
                assert_eq!(from, "first");
                assert_eq!(to, "nowhere");
            }
            other => panic!("expected UnknownTransition, got {:?}", other),
        }
    }

    /// **Scenario**: AwaitInput suspends the run with state and request; resume continues it.
    #[tokio::test]
    async fn invoke_await_input_suspends_then_resume_finishes() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node(
                "ask",
                add_node(1, Transition::AwaitInput(InputRequest::new("answer"))),
            )
            .unwrap();
        workflow
            .add_node("answer", add_node(10, Transition::End))
            .unwrap();
        workflow.set_entry("ask");
        let compiled = workflow.compile().unwrap();

        let (state, request) = match compiled.invoke(0).await.unwrap() {
            RunOutcome::Suspended { state, request } => (state, request),
            other => panic!("expected Suspended, got {:?}", other),
        };
        assert_eq!(state, 1, "side effects applied before suspension");
        assert_eq!(request.resume, "answer");

        let outcome = compiled.resume(state, request.resume).await.unwrap();
        assert_eq!(unwrap_finished(outcome), 11);
    }

    /// **Scenario**: AwaitInput naming an unregistered resume node fails with UnknownTransition.
    #[tokio::test]
    async fn invoke_await_input_unknown_resume_fails() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node(
                "ask",
                add_node(1, Transition::AwaitInput(InputRequest::new("ghost"))),
            )
            .unwrap();
        workflow.set_entry("ask");
        let compiled = workflow.compile().unwrap();
        match compiled.invoke(0).await {
            Err(FlowError::Config(ConfigError::UnknownTransition { to, .. })) => {
                assert_eq!(to, "ghost");
            }
            other => panic!("expected UnknownTransition, got {:?}", other),
        }
    }

    /// **Scenario**: resume with an unregistered node fails with UnknownNode.
    #[tokio::test]
    async fn resume_unknown_node_fails() {
        let workflow = two_step_workflow();
        match workflow.resume(0, "ghost").await {
            Err(FlowError::Config(ConfigError::UnknownNode(name))) => assert_eq!(name, "ghost"),
            other => panic!("expected UnknownNode, got {:?}", other),
        }
    }

    /// **Scenario**: A cyclic graph with a step limit fails with StepLimitExceeded.
    #[tokio::test]
    async fn invoke_cycle_hits_step_limit() {
        let mut workflow = Workflow::<i32>::new().with_step_limit(5);
        workflow
            .add_node("ping", add_node(1, Transition::Goto("pong".to_string())))
            .unwrap();
        workflow
            .add_node("pong", add_node(1, Transition::Goto("ping".to_string())))
            .unwrap();
        workflow.set_entry("ping");
        let compiled = workflow.compile().unwrap();
        match compiled.invoke(0).await {
            Err(FlowError::StepLimitExceeded(limit)) => assert_eq!(limit, 5),
            other => panic!("expected StepLimitExceeded, got {:?}", other),
        }
    }

    /// **Scenario**: stream emits one Step per node, in execution order, then ends.
    #[tokio::test]
    async fn stream_emits_steps_in_order() {
        let workflow = two_step_workflow();
        let events: Vec<_> = workflow.stream(0).collect().await;
        assert_eq!(events.len(), 2);
        match &events[0] {
            RunEvent::Step { node, state } => {
                assert_eq!(node, "first");
                assert_eq!(*state, 1);
            }
            other => panic!("expected Step(first), got {:?}", other),
        }
        match &events[1] {
            RunEvent::Step { node, state } => {
                assert_eq!(node, "second");
                assert_eq!(*state, 3);
            }
            other => panic!("expected Step(second), got {:?}", other),
        }
    }

    /// **Scenario**: A bad transition mid-run streams the offending node's Step
    /// (side effects applied, no rollback) followed by a Failed event.
    #[tokio::test]
    async fn stream_bad_transition_shows_side_effects_then_failure() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node(
                "first",
                add_node(1, Transition::Goto("nowhere".to_string())),
            )
            .unwrap();
        workflow.set_entry("first");
        let compiled = workflow.compile().unwrap();

        let events: Vec<_> = compiled.stream(0).collect().await;
        assert_eq!(events.len(), 2);
        match &events[0] {
            RunEvent::Step { node, state } => {
                assert_eq!(node, "first");
                assert_eq!(*state, 1, "side effects already applied");
            }
            other => panic!("expected Step, got {:?}", other),
        }
        match &events[1] {
            RunEvent::Failed(FlowError::Config(ConfigError::UnknownTransition { to, .. })) => {
                assert_eq!(to, "nowhere");
            }
            other => panic!("expected Failed(UnknownTransition), got {:?}", other),
        }
    }

    /// **Scenario**: stream over a suspending workflow ends with a Suspended event.
    #[tokio::test]
    async fn stream_suspension_emits_suspended_event() {
        let mut workflow = Workflow::<i32>::new();
        workflow
            .add_node(
                "ask",
                add_node(1, Transition::AwaitInput(InputRequest::new("answer"))),
            )
            .unwrap();
        workflow
            .add_node("answer", add_node(1, Transition::End))
            .unwrap();
        workflow.set_entry("ask");
        let compiled = workflow.compile().unwrap();

        let events: Vec<_> = compiled.stream(0).collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], RunEvent::Step { node, .. } if node == "ask"));
        match &events[1] {
            RunEvent::Suspended { request } => assert_eq!(request.resume, "answer"),
            other => panic!("expected Suspended, got {:?}", other),
        }
    }
}
