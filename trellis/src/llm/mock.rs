//! Scripted chat model for tests and examples.
//!
//! Returns canned assistant text without touching the network, so workflow
//! and chain behavior can be tested deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::FlowError;
use crate::message::Message;

use super::{ChatModel, Completion};

/// Mock chat model returning canned replies.
///
/// [`fixed`](MockChat::fixed) replies with the same text on every call;
/// [`scripted`](MockChat::scripted) replies with each text in turn and
/// repeats the last one when the script runs out. Never reports usage.
pub struct MockChat {
    replies: Vec<String>,
    calls: AtomicUsize,
}

impl MockChat {
    /// Same reply on every call.
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self {
            replies: vec![reply.into()],
            calls: AtomicUsize::new(0),
        }
    }

    /// Successive replies, repeating the last when the script runs out.
    /// An empty script behaves like `fixed("")`.
    pub fn scripted(replies: Vec<String>) -> Self {
        let replies = if replies.is_empty() {
            vec![String::new()]
        } else {
            replies
        };
        Self {
            replies,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn invoke(&self, _messages: &[Message]) -> Result<Completion, FlowError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = n.min(self.replies.len() - 1);
        Ok(Completion {
            content: self.replies[idx].clone(),
            usage: None,
        })
    }
}
