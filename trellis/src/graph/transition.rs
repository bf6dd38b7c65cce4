//! Transition returned by a node: continue along declared edges, jump to a
//! node, request external input, or end the run.
//!
//! Declared edges are advisory: the run loop honors whatever a node returns
//! here, and an unknown target fails the run with
//! [`ConfigError::UnknownTransition`](super::ConfigError::UnknownTransition).

/// Request for external input raised by a node.
///
/// The run loop surfaces this as [`RunOutcome::Suspended`](super::RunOutcome):
/// the caller collects the input, writes it into the state, and calls
/// [`CompiledWorkflow::resume`](super::CompiledWorkflow::resume) with
/// `resume` as the target node. The node itself never blocks on I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    /// Node to run once input has been supplied.
    pub resume: String,
    /// Optional prompt to show whoever supplies the input.
    pub prompt: Option<String>,
}

impl InputRequest {
    /// Creates a request that resumes at the given node.
    pub fn new(resume: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            prompt: None,
        }
    }

    /// Sets the prompt shown to the input source.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// Next step after running a node.
///
/// - **Continue**: follow the declared outgoing edge; end the run when there
///   is none.
/// - **Goto(name)**: run the named node next, declared edges notwithstanding.
/// - **AwaitInput**: pause the run until the caller supplies external input.
/// - **End**: stop and return the current state as final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Follow the declared outgoing edge; end the run when there is none.
    Continue,
    /// Run the named node next, whatever the declared edges say.
    Goto(String),
    /// Pause the run; the caller supplies input and resumes.
    AwaitInput(InputRequest),
    /// Stop and return the current state.
    End,
}
