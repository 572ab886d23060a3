//! Append-only log of conversation turns.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// The ordered sequence of messages shown to the user.
///
/// Append is the only mutation: messages are never edited, reordered, or
/// removed. Clearing a session replaces the whole transcript instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    ///
    /// Append always succeeds; content is accepted as opaque text,
    /// including empty bodies.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the full ordered sequence for rendering.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
