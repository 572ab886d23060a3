//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles and message content.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the remote agent.
    Assistant,
    /// Client-generated status message.
    System,
}

/// A single turn in the transcript.
///
/// Messages are immutable once created: the transcript only ever appends
/// them, never edits or reorders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID format), stable for the session.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    /// True only for assistant messages that surface a failure to the user.
    #[serde(default)]
    pub is_error: bool,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_error,
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, false)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, false)
    }

    /// Creates an assistant turn that surfaces a failure to the user.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, true)
    }

    /// Creates a system turn (inline status decorations).
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role_and_flag() {
        assert_eq!(Message::user("hola").role, MessageRole::User);
        assert_eq!(Message::assistant("hola").role, MessageRole::Assistant);
        assert_eq!(Message::system("hola").role, MessageRole::System);

        assert!(!Message::assistant("ok").is_error);
        assert!(Message::assistant_error("fallo").is_error);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("uno");
        let b = Message::user("uno");
        assert_ne!(a.id, b.id);
    }
}
