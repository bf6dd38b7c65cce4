//! Workflow configuration errors.
//!
//! Returned by `Workflow::add_node` and `Workflow::compile` where detectable
//! statically, or raised at the offending transition during a run.

use thiserror::Error;

/// A mis-wired workflow graph.
///
/// Static cases (`DuplicateNode`, `UnknownNode`, `MissingEntry`,
/// `DuplicateEdge`) surface before any node executes. `UnknownTransition` is
/// the dynamic case: a node returned a target that names no registered node,
/// detected at the bad transition after the node's side effects have applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `add_node` was called twice with the same name.
    #[error("node already registered: {0}")]
    DuplicateNode(String),

    /// An edge endpoint, the entry node, or a resume target names no
    /// registered node.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// `compile` was called before `set_entry`.
    #[error("no entry node set")]
    MissingEntry,

    /// A node declared more than one outgoing edge.
    #[error("duplicate outgoing edge from: {0}")]
    DuplicateEdge(String),

    /// A node returned a transition to a name that is not registered.
    #[error("transition from {from} to unknown node: {to}")]
    UnknownTransition {
        /// Node that produced the transition.
        from: String,
        /// The unregistered target.
        to: String,
    },
}
