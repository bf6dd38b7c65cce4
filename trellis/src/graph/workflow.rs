//! Workflow builder: register nodes, declare edges, pick the entry node,
//! then compile into an executable run loop.
//!
//! Edges are advisory documentation of expected flow; they resolve
//! [`Transition::Continue`](super::Transition::Continue) and feed the
//! renderers, but a node may jump anywhere with `Transition::Goto`.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compiled::CompiledWorkflow;
use super::config_error::ConfigError;
use super::node::Node;

/// Terminal marker for the edge table: use as `to` in `add_edge(last, END)`.
pub const END: &str = "__end__";

/// Workflow under construction: named nodes plus declared edges.
///
/// Generic over the state type `S`. Register nodes with [`add_node`]
/// (duplicate names are a configuration error), declare the expected chain
/// with [`add_edge`] using [`END`] as exit marker, designate the starting
/// node with [`set_entry`], then [`compile`] to obtain a
/// [`CompiledWorkflow`].
///
/// [`add_node`]: Workflow::add_node
/// [`add_edge`]: Workflow::add_edge
/// [`set_entry`]: Workflow::set_entry
/// [`compile`]: Workflow::compile
pub struct Workflow<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Declared edges (from, to); at most one outgoing edge per node.
    edges: Vec<(String, String)>,
    entry: Option<String>,
    /// Optional guard against mis-wired cycles; `None` means unlimited.
    step_limit: Option<usize>,
}

impl<S> Default for Workflow<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Workflow<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty workflow.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            entry: None,
            step_limit: None,
        }
    }

    /// Registers a node under a unique name.
    ///
    /// Fails with [`ConfigError::DuplicateNode`] when the name is already
    /// taken; the prior registration is left intact.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        node: Arc<dyn Node<S>>,
    ) -> Result<&mut Self, ConfigError> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(ConfigError::DuplicateNode(name));
        }
        self.nodes.insert(name, node);
        Ok(self)
    }

    /// Declares an edge from `from` to `to`; use [`END`] as `to` for exit.
    ///
    /// Endpoints are validated by [`compile`](Workflow::compile), before any
    /// node executes. Declared edges only resolve `Transition::Continue`.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Designates the starting node. Validated by [`compile`](Workflow::compile).
    pub fn set_entry(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry = Some(name.into());
        self
    }

    /// Caps the number of node executions per run.
    ///
    /// Off by default. With a limit set, a run that executes more steps fails
    /// with [`FlowError::StepLimitExceeded`](crate::FlowError::StepLimitExceeded);
    /// useful when declared edges or `Goto` targets form a cycle.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Validates the graph and builds the executable workflow.
    ///
    /// Checks that an entry node is set and registered, that every edge
    /// endpoint is registered (or [`END`] as target), and that no node
    /// declares two outgoing edges. On success the workflow is immutable and
    /// ready for `invoke`.
    pub fn compile(self) -> Result<CompiledWorkflow<S>, ConfigError> {
        let entry = self.entry.ok_or(ConfigError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(ConfigError::UnknownNode(entry));
        }

        let mut seen_from: HashSet<&str> = HashSet::new();
        for (from, to) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(ConfigError::UnknownNode(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(ConfigError::UnknownNode(to.clone()));
            }
            if !seen_from.insert(from.as_str()) {
                return Err(ConfigError::DuplicateEdge(from.clone()));
            }
        }

        let next_map: HashMap<String, String> = self.edges.into_iter().collect();

        Ok(CompiledWorkflow {
            nodes: self.nodes,
            entry,
            next_map,
            step_limit: self.step_limit,
        })
    }
}
