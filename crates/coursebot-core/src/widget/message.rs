//! Transcript message types.
//!
//! This module contains the sender enum, a single rendered message, and the
//! append-only transcript that holds them in insertion order.

use serde::{Deserialize, Serialize};

use crate::render::Markup;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Text typed into the widget input.
    User,
    /// Widget copy or a server reply.
    Bot,
}

/// A single message in the transcript.
///
/// Content is always ready to insert as HTML: user text is escaped on
/// construction, bot content is trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author of the message.
    pub sender: Sender,
    /// HTML-safe content.
    pub content: Markup,
    /// Timestamp when the message was appended (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a user message, escaping the raw text.
    pub fn user(text: &str) -> Self {
        Self::new(Sender::User, Markup::escape(text))
    }

    /// Creates a bot message from already formatted markup.
    pub fn bot(content: impl Into<Markup>) -> Self {
        Self::new(Sender::Bot, content.into())
    }

    fn new(sender: Sender, content: Markup) -> Self {
        Self {
            sender,
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Ordered, append-only list of rendered messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns the new length.
    pub fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Messages appended after the first `offset` entries.
    pub fn since(&self, offset: usize) -> &[ChatMessage] {
        self.messages.get(offset..).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_escaped() {
        let message = ChatMessage::user("<script>alert('x')</script>");
        assert_eq!(
            message.content.as_str(),
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
        assert!(message.is_user());
    }

    #[test]
    fn test_bot_message_is_verbatim() {
        let message = ChatMessage::bot(Markup::trusted("<strong>hi</strong>"));
        assert_eq!(message.content.as_str(), "<strong>hi</strong>");
        assert_eq!(message.sender, Sender::Bot);
    }

    #[test]
    fn test_transcript_since() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("one"));
        transcript.push(ChatMessage::user("two"));
        assert_eq!(transcript.since(1).len(), 1);
        assert_eq!(transcript.since(1)[0].content.as_str(), "two");
        assert!(transcript.since(5).is_empty());
    }
}
