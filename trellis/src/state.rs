//! Chat workflow state: one fixed record threaded through the run loop.
//!
//! Each workflow uses a single state type that every node reads from and
//! writes to. `ChatState` is the record for conversational workflows; fields
//! are fixed and typed, there is no ad hoc key space.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// State for conversational workflows.
///
/// Owned by the run loop for the duration of one run and passed through each
/// node by value. `pending_input` carries the value supplied by the caller at
/// a suspension point; the resumed node consumes it with [`ChatState::take_input`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    /// Conversation so far, in insertion order.
    pub messages: Vec<Message>,
    /// External input supplied between suspension and resume, if any.
    pub pending_input: Option<String>,
}

impl ChatState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded with the given messages.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            pending_input: None,
        }
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Content of the most recent message, if any.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(Message::content)
    }

    /// Content of the most recent user message, if any.
    pub fn last_user(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::User(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Records external input ahead of a resume.
    pub fn supply_input(&mut self, input: impl Into<String>) {
        self.pending_input = Some(input.into());
    }

    /// Takes the pending external input, leaving `None`.
    pub fn take_input(&mut self) -> Option<String> {
        self.pending_input.take()
    }
}
