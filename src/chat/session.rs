//! Front-end session: input lines in, rendered bubbles out.
//!
//! This module provides the `ChatSession` struct which sits between the line
//! reader and a [`ChatView`], keeping track of the replies still in flight.

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::chat::commands::{ChatCommand, help_text, parse_command};
use crate::chat::view::{ChatView, PendingReply};
use crate::client::Agent;
use crate::render::Renderer;
use crate::types::Message;

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading input.
    Continue,

    /// Leave the chat.
    Quit,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// The number of messages in the conversation.
    pub message_count: usize,
    /// Submissions still waiting on the agent.
    pub pending_replies: usize,
}

/// A chat session driving one [`ChatView`].
pub struct ChatSession<A: Agent> {
    view: ChatView<A>,
    pending: FuturesUnordered<PendingReply>,
}

impl<A: Agent + 'static> ChatSession<A> {
    /// Creates a new session over a view.
    pub fn new(view: ChatView<A>) -> Self {
        Self {
            view,
            pending: FuturesUnordered::new(),
        }
    }

    /// Returns the view this session drives.
    pub fn view(&self) -> &ChatView<A> {
        &self.view
    }

    /// Returns the number of replies still in flight.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Handles one line of input.
    ///
    /// Slash commands are executed right away.  Anything else becomes the
    /// draft and is submitted; its reply is delivered by [`Self::next_reply`].
    pub fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> Step {
        if let Some(cmd) = parse_command(line) {
            return self.run_command(cmd, renderer);
        }

        self.view.set_draft(line);
        if let Some(pending) = self.view.submit() {
            self.pending.push(pending);
        }
        Step::Continue
    }

    /// Waits for the next reply to arrive, in whatever order they resolve.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next_reply(&mut self) -> Option<Message> {
        self.pending.next().await
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.view.message_count(),
            pending_replies: self.pending_count(),
        }
    }

    fn run_command(&mut self, cmd: ChatCommand, renderer: &mut dyn Renderer) -> Step {
        match cmd {
            ChatCommand::Quit => return Step::Quit,
            ChatCommand::Help => {
                for line in help_text().lines() {
                    renderer.print_info(&format!("    {line}"));
                }
            }
            ChatCommand::History => {
                let messages = self.view.messages();
                if messages.is_empty() {
                    renderer.print_info("No messages yet.");
                } else {
                    renderer.print_conversation(&messages);
                }
            }
            ChatCommand::Stats => {
                let stats = self.stats();
                renderer.print_info("    Session Statistics:");
                renderer.print_info(&format!("      Messages: {}", stats.message_count));
                renderer.print_info(&format!(
                    "      Waiting on agent: {}",
                    stats.pending_replies
                ));
            }
            ChatCommand::Invalid(message) => renderer.print_error(&message),
        }
        Step::Continue
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::error::Result;
    use crate::types::NO_RESPONSE_TEXT;

    struct EchoAgent;

    #[async_trait::async_trait]
    impl Agent for EchoAgent {
        async fn query(&self, query: &str) -> Result<Value> {
            Ok(json!({ "response": query.trim().to_uppercase() }))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<Message>,
        info: Vec<String>,
        errors: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn print_message(&mut self, message: &Message) {
            self.messages.push(message.clone());
        }

        fn print_error(&mut self, error: &str) {
            self.errors.push(error.to_string());
        }

        fn print_info(&mut self, info: &str) {
            self.info.push(info.to_string());
        }
    }

    fn session() -> ChatSession<EchoAgent> {
        ChatSession::new(ChatView::new(EchoAgent))
    }

    #[tokio::test]
    async fn line_is_submitted_and_reply_delivered() {
        let mut session = session();
        let mut renderer = RecordingRenderer::default();

        assert_eq!(session.handle_line("hello", &mut renderer), Step::Continue);
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.view().messages(), vec![Message::user("hello")]);

        assert_eq!(session.next_reply().await, Some(Message::bot("HELLO")));
        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.next_reply().await, None);
    }

    #[tokio::test]
    async fn blank_line_sends_nothing() {
        let mut session = session();
        let mut renderer = RecordingRenderer::default();

        session.handle_line("   ", &mut renderer);
        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.view().message_count(), 0);
    }

    #[tokio::test]
    async fn several_lines_in_flight() {
        let mut session = session();
        let mut renderer = RecordingRenderer::default();

        session.handle_line("one", &mut renderer);
        session.handle_line("two", &mut renderer);
        assert_eq!(
            session.stats(),
            SessionStats {
                message_count: 2,
                pending_replies: 2,
            }
        );

        let mut replies = Vec::new();
        while let Some(reply) = session.next_reply().await {
            replies.push(reply.text().to_string());
        }
        replies.sort();
        assert_eq!(replies, vec!["ONE".to_string(), "TWO".to_string()]);
        assert_eq!(session.view().message_count(), 4);
    }

    #[tokio::test]
    async fn commands_are_not_sent() {
        let mut session = session();
        let mut renderer = RecordingRenderer::default();

        assert_eq!(session.handle_line("/help", &mut renderer), Step::Continue);
        assert_eq!(session.handle_line("/bogus", &mut renderer), Step::Continue);
        assert_eq!(session.handle_line(" /quit ", &mut renderer), Step::Quit);

        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.view().message_count(), 0);
        assert!(renderer.info.iter().any(|line| line.contains("/history")));
        assert_eq!(renderer.errors.len(), 1);
    }

    #[tokio::test]
    async fn history_renders_conversation() {
        let mut session = session();
        let mut renderer = RecordingRenderer::default();

        session.handle_line("/history", &mut renderer);
        assert_eq!(renderer.info, vec!["No messages yet.".to_string()]);

        session.handle_line("hi", &mut renderer);
        session.next_reply().await;
        session.handle_line("/history", &mut renderer);
        assert_eq!(
            renderer.messages,
            vec![Message::user("hi"), Message::bot("HI")]
        );
        assert_ne!(renderer.messages[1].text(), NO_RESPONSE_TEXT);
    }
}
