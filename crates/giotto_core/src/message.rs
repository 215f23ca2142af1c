//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A role-tagged message in a conversation.
///
/// Messages are sent verbatim to the remote API as an ordered sequence.
///
/// # Examples
///
/// ```
/// use giotto_core::{ChatMessage, Role};
///
/// let message = ChatMessage::user("Hello!");
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: Role,
    /// The content of the message
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
