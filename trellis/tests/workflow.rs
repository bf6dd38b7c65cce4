//! Integration tests: workflow runs over ChatState, message append order,
//! bad transitions, determinism.

mod init_logging;

use std::sync::Arc;

use tokio_stream::StreamExt;

use trellis::{
    ChatState, ConfigError, FlowError, FnNode, Message, Node, RunEvent, RunOutcome, Transition,
    Workflow, END,
};

fn append_node(text: &'static str, transition: Transition) -> Arc<dyn Node<ChatState>> {
    Arc::new(FnNode::new(move |mut state: ChatState| {
        let transition = transition.clone();
        async move {
            state.push(Message::assistant(text));
            Ok((state, transition))
        }
    }))
}

/// **Scenario**: A two-node graph A→B→END visits A then B; the final messages
/// are exactly A's appends followed by B's, in that order.
#[tokio::test]
async fn two_node_chain_appends_in_order() {
    let mut workflow = Workflow::<ChatState>::new();
    workflow
        .add_node("a", append_node("from-a", Transition::Continue))
        .unwrap();
    workflow
        .add_node("b", append_node("from-b", Transition::Continue))
        .unwrap();
    workflow
        .add_edge("a", "b")
        .add_edge("b", END)
        .set_entry("a");
    let compiled = workflow.compile().expect("valid workflow");

    let outcome = compiled.invoke(ChatState::default()).await.unwrap();
    let state = match outcome {
        RunOutcome::Finished(state) => state,
        other => panic!("expected Finished, got {:?}", other),
    };
    assert_eq!(
        state.messages,
        vec![Message::assistant("from-a"), Message::assistant("from-b")]
    );
}

/// **Scenario**: A node returning a transition to an unregistered name fails
/// with a configuration error after its side effects have applied; the stream
/// shows the applied state followed by the failure (no rollback).
#[tokio::test]
async fn bad_transition_fails_after_side_effects() {
    let mut workflow = Workflow::<ChatState>::new();
    workflow
        .add_node(
            "a",
            append_node("from-a", Transition::Goto("missing".to_string())),
        )
        .unwrap();
    workflow.set_entry("a");
    let compiled = workflow.compile().expect("valid workflow");

    let events: Vec<_> = compiled.stream(ChatState::default()).collect().await;
    assert_eq!(events.len(), 2);
    match &events[0] {
        RunEvent::Step { node, state } => {
            assert_eq!(node, "a");
            assert_eq!(state.messages, vec![Message::assistant("from-a")]);
        }
        other => panic!("expected Step, got {:?}", other),
    }
    match &events[1] {
        RunEvent::Failed(FlowError::Config(ConfigError::UnknownTransition { from, to })) => {
            assert_eq!(from, "a");
            assert_eq!(to, "missing");
        }
        other => panic!("expected Failed(UnknownTransition), got {:?}", other),
    }

    // invoke reports the same failure
    match compiled.invoke(ChatState::default()).await {
        Err(FlowError::Config(ConfigError::UnknownTransition { .. })) => {}
        other => panic!("expected UnknownTransition, got {:?}", other),
    }
}

/// **Scenario**: Running the same graph twice from the same initial state
/// produces identical message sequences.
#[tokio::test]
async fn same_graph_twice_is_deterministic() {
    let build = || {
        let mut workflow = Workflow::<ChatState>::new();
        workflow
            .add_node("a", append_node("one", Transition::Continue))
            .unwrap();
        workflow
            .add_node("b", append_node("two", Transition::End))
            .unwrap();
        workflow.add_edge("a", "b").set_entry("a");
        workflow.compile().expect("valid workflow")
    };

    let initial = ChatState::with_messages(vec![Message::user("start")]);
    let first = match build().invoke(initial.clone()).await.unwrap() {
        RunOutcome::Finished(state) => state,
        other => panic!("expected Finished, got {:?}", other),
    };
    let second = match build().invoke(initial).await.unwrap() {
        RunOutcome::Finished(state) => state,
        other => panic!("expected Finished, got {:?}", other),
    };
    assert_eq!(first.messages, second.messages);
}

/// **Scenario**: The per-step stream over a three-node chain yields one state
/// snapshot per node, in execution order, and is finite.
#[tokio::test]
async fn stream_yields_one_snapshot_per_node() {
    let mut workflow = Workflow::<ChatState>::new();
    workflow
        .add_node("a", append_node("1", Transition::Continue))
        .unwrap();
    workflow
        .add_node("b", append_node("2", Transition::Continue))
        .unwrap();
    workflow
        .add_node("c", append_node("3", Transition::End))
        .unwrap();
    workflow
        .add_edge("a", "b")
        .add_edge("b", "c")
        .set_entry("a");
    let compiled = workflow.compile().expect("valid workflow");

    let events: Vec<_> = compiled.stream(ChatState::default()).collect().await;
    let nodes: Vec<_> = events
        .iter()
        .map(|e| match e {
            RunEvent::Step { node, state } => {
                (node.clone(), state.messages.len())
            }
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    assert_eq!(
        nodes,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
}
