use std::fmt;

use serde::{Deserialize, Serialize};

/// Who wrote a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the chat.
    User,

    /// The remote agent.
    Bot,
}

impl Sender {
    /// The label shown in front of a message of this sender.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Agent",
        }
    }

    /// The wire name of this sender.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat bubble.
///
/// Messages are never edited after creation; the fields are only readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    /// Create a new `Message`.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Create a message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a message produced on behalf of the agent.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Who wrote the message.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// The message text, exactly as it was submitted or received.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the user wrote this message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
