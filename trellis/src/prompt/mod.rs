//! Prompt templates and the YAML prompt library.
//!
//! [`PromptTemplate`] renders `{name}` placeholders with explicit errors;
//! [`load`]/[`load_or_default`] read prompt YAML files from a directory with
//! embedded compile-time defaults.

mod load;
mod template;

pub use load::{
    default_from_embedded, load, load_or_default, ChatPrompts, LoadError, PromptLibrary, QaPrompts,
};
pub use template::{PromptError, PromptTemplate};
