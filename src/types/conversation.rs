use std::slice;

use crate::types::Message;

/// The ordered list of chat bubbles.
///
/// A conversation only grows.  Insertion order is display order and a
/// message's position is its only identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the conversation.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The message at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Iterate over the messages in display order.
    pub fn iter(&self) -> slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// The messages in display order.
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;

    #[test]
    fn new_conversation_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.len(), 0);
        assert!(conversation.last().is_none());
    }

    #[test]
    fn push_preserves_order_and_duplicates() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("hi"));
        conversation.push(Message::bot("hello"));
        conversation.push(Message::user("hi"));

        assert_eq!(conversation.len(), 3);
        let senders: Vec<Sender> = conversation.iter().map(Message::sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User]);
        assert_eq!(conversation.get(0), conversation.get(2));
        assert_eq!(conversation.last().map(Message::text), Some("hi"));
    }
}
