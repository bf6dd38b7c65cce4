//! Run-level error types.
//!
//! Used by `Node::run`, `ChatModel::invoke`, the retrieval layer, and the
//! workflow run loop.

use thiserror::Error;

use crate::graph::ConfigError;
use crate::prompt::PromptError;

/// Error from running a workflow, chain, or retrieval pipeline.
///
/// Configuration problems are fatal to the run. External-call failures are
/// propagated to the caller without retry; no retry policy exists in this
/// runner.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The graph was mis-wired: duplicate node, unknown entry, edge or
    /// transition naming an unregistered node.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A Model API or Document Store call failed (network, API, decode).
    #[error("external call failed: {0}")]
    ExternalCall(String),

    /// A prompt template could not be rendered.
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// The configured step limit was reached before the run terminated.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(usize),
}
