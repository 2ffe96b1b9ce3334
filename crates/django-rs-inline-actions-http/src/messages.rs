//! One-time notifications attached to a request.
//!
//! Action handlers report what they did ("Article published.") through the
//! request's [`MessageStorage`]. Messages are consumed when read, mirroring
//! Django's `django.contrib.messages`.

use serde::{Deserialize, Serialize};

/// The severity level of a message.
///
/// Mirrors Django's message levels (DEBUG=10, INFO=20, SUCCESS=25, WARNING=30, ERROR=40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageLevel {
    /// Debug-level message, typically not shown in production.
    Debug = 10,
    /// Informational message.
    Info = 20,
    /// Success notification.
    Success = 25,
    /// Warning that requires attention.
    Warning = 30,
    /// Error message indicating a failure.
    Error = 40,
}

impl MessageLevel {
    /// Returns the CSS tag class for this level.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single notification message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The severity level of this message.
    pub level: MessageLevel,
    /// The message text.
    pub text: String,
}

impl Message {
    /// Creates a new message with the given level and text.
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Storage for one-time messages.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions_http::{MessageLevel, MessageStorage};
///
/// let mut storage = MessageStorage::new();
/// storage.add(MessageLevel::Info, "Article published.");
///
/// let messages = storage.take();
/// assert_eq!(messages.len(), 1);
/// assert!(storage.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageStorage {
    messages: Vec<Message>,
}

impl MessageStorage {
    /// Creates a new empty message storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message with the given level and text.
    pub fn add(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(Message::new(level, text));
    }

    /// Drains and returns all stored messages.
    pub fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    /// Returns the stored messages without consuming them.
    pub fn peek(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_level_tag() {
        assert_eq!(MessageLevel::Info.tag(), "info");
        assert_eq!(MessageLevel::Error.to_string(), "error");
        assert!(MessageLevel::Warning > MessageLevel::Success);
    }

    #[test]
    fn test_storage_drains() {
        let mut storage = MessageStorage::new();
        storage.add(MessageLevel::Info, "one");
        storage.add(MessageLevel::Warning, "two");
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.peek()[1].text, "two");

        let drained = storage.take();
        assert_eq!(drained.len(), 2);
        assert!(storage.take().is_empty());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::new(MessageLevel::Success, "Saved.");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"text\":\"Saved.\""));
    }
}
