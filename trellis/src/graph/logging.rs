//! Structured logging for workflow runs.
//!
//! Helper functions so the run loop logs uniformly; see each call site in
//! `compiled.rs`.

use std::fmt::Debug;

use crate::error::FlowError;

use super::transition::Transition;

/// Log run start with its first node.
pub fn log_run_start(start: &str) {
    tracing::info!(start = start, "starting workflow run");
}

/// Log one node about to execute, with its input state.
pub fn log_step<S: Debug>(node: &str, state: &S) {
    tracing::debug!(node = node, state = ?state, "executing node");
}

/// Log the transition a node returned.
pub fn log_transition(node: &str, transition: &Transition) {
    tracing::debug!(node = node, ?transition, "node complete");
}

/// Log run completion (or suspension) with the number of executed steps.
pub fn log_run_complete(steps: usize) {
    tracing::info!(steps = steps, "workflow run complete");
}

/// Log a run-fatal error.
pub fn log_run_error(error: &FlowError) {
    tracing::error!(?error, "workflow run failed");
}
