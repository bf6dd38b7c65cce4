//! Workflow node trait: one step, state in, (state, transition) out.

use std::fmt::Debug;
use std::future::Future;

use async_trait::async_trait;

use crate::error::FlowError;

use super::Transition;

/// One step in a workflow.
///
/// Receives the state by value, returns the updated state and the
/// [`Transition`] to take next. Nodes are registered under a name with
/// [`Workflow::add_node`](super::Workflow::add_node); the run loop owns the
/// state between steps, so no node ever observes another node mid-mutation.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// One step: state in, (state out, transition) out.
    async fn run(&self, state: S) -> Result<(S, Transition), FlowError>;
}

/// Adapter turning an async closure into a [`Node`].
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use trellis::{ChatState, FnNode, Message, Node, Transition};
///
/// let node: Arc<dyn Node<ChatState>> =
///     Arc::new(FnNode::new(|mut state: ChatState| async move {
///         state.push(Message::assistant("hello"));
///         Ok((state, Transition::End))
///     }));
/// # let _ = node;
/// ```
pub struct FnNode<F> {
    f: F,
}

impl<F> FnNode<F> {
    /// Wraps the closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<S, F, Fut> Node<S> for FnNode<F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(S) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(S, Transition), FlowError>> + Send,
{
    async fn run(&self, state: S) -> Result<(S, Transition), FlowError> {
        (self.f)(state).await
    }
}
