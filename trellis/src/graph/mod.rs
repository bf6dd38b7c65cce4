//! Workflow graph: named nodes plus declared edges, compile and run.
//!
//! Build with [`Workflow`] (`add_node` / `add_edge` / `set_entry`), compile,
//! then run with [`CompiledWorkflow::invoke`], [`CompiledWorkflow::resume`],
//! or [`CompiledWorkflow::stream`].

mod compiled;
mod config_error;
pub mod logging;
mod node;
mod render;
mod transition;
mod workflow;

pub use compiled::{CompiledWorkflow, RunEvent, RunOutcome};
pub use config_error::ConfigError;
pub use node::{FnNode, Node};
pub use render::{render_dot, render_text};
pub use transition::{InputRequest, Transition};
pub use workflow::{Workflow, END};
