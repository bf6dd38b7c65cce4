//! # Trellis
//!
//! A minimal graph-workflow and retrieval toolkit in Rust. Build stateful
//! workflows with a simple **state-in, state-out** design: one shared state
//! type flows through named nodes, and each node returns the updated state
//! plus the transition to take next.
//!
//! ## Design principles
//!
//! - **Single state type**: each workflow uses one state struct (e.g.
//!   [`ChatState`]) that all nodes read from and write to; no ad hoc keys.
//! - **Advisory edges**: declared edges document the expected flow and
//!   resolve [`Transition::Continue`]; whatever transition a node actually
//!   returns is honored, and unknown targets fail the run.
//! - **Cooperative suspension**: a node requests external input by returning
//!   [`Transition::AwaitInput`]; the run loop surfaces
//!   [`RunOutcome::Suspended`] and the caller resumes with the same state.
//! - **Opaque collaborators**: the model API ([`ChatModel`]) and the document
//!   store ([`Embedder`], [`VectorIndex`]) are boundaries; their failures
//!   surface as [`FlowError::ExternalCall`] without retry.
//!
//! ## Main modules
//!
//! - [`graph`]: build and run workflows ([`Workflow`], [`CompiledWorkflow`],
//!   [`Node`], [`Transition`]).
//! - [`llm`]: [`ChatModel`] trait, [`MockChat`], [`OpenAiChat`].
//! - [`prompt`]: [`PromptTemplate`], YAML [`PromptLibrary`].
//! - [`chain`]: [`LlmChain`], a template bound to a model.
//! - [`retrieval`]: [`CharacterSplitter`], [`VectorIndex`], [`RetrievalQa`].
//! - [`message`] / [`state`]: [`Message`], [`ChatState`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trellis::{ChatState, FnNode, Message, RunOutcome, Transition, Workflow, END};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), trellis::FlowError> {
//! let mut workflow = Workflow::<ChatState>::new();
//! workflow.add_node(
//!     "greet",
//!     Arc::new(FnNode::new(|mut state: ChatState| async move {
//!         state.push(Message::assistant("Hello! What's your name?"));
//!         Ok((state, Transition::End))
//!     })),
//! )?;
//! workflow.add_edge("greet", END).set_entry("greet");
//!
//! let compiled = workflow.compile()?;
//! match compiled.invoke(ChatState::default()).await? {
//!     RunOutcome::Finished(state) => println!("{:?}", state.messages),
//!     RunOutcome::Suspended { .. } => {}
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Run the examples: `cargo run -p trellis-examples --example chat_repl`.

pub mod chain;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompt;
pub mod retrieval;
pub mod state;

pub use chain::{ChainOutput, LlmChain};
pub use error::FlowError;
pub use graph::{
    render_dot, render_text, CompiledWorkflow, ConfigError, FnNode, InputRequest, Node, RunEvent,
    RunOutcome, Transition, Workflow, END,
};
pub use llm::{ChatModel, Completion, MockChat, OpenAiChat, TokenUsage};
pub use message::Message;
pub use prompt::{
    default_from_embedded as default_prompts_from_embedded, load as load_prompts,
    load_or_default as load_prompts_or_default, ChatPrompts, LoadError as PromptsLoadError,
    PromptError, PromptLibrary, PromptTemplate, QaPrompts,
};
pub use retrieval::{
    Answer, CharacterSplitter, Embedder, OpenAiEmbedder, RetrievalQa, SearchHit, SplitError,
    VectorIndex,
};
pub use state::ChatState;
