//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the front end without sending anything to the
//! agent.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Print the whole conversation again.
    History,

    /// Display message and in-flight request counts.
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted to the agent.
///
/// # Examples
///
/// ```
/// # use agent_chat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("What is 2+2?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match (command.as_str(), argument) {
        ("history", None) => ChatCommand::History,
        ("stats" | "status", None) => ChatCommand::Stats,
        ("help" | "?", None) => ChatCommand::Help,
        ("quit" | "exit" | "q", None) => ChatCommand::Quit,
        ("history" | "stats" | "status" | "help" | "?" | "quit" | "exit" | "q", Some(_)) => {
            ChatCommand::Invalid(format!("/{command} takes no arguments"))
        }
        ("", _) => ChatCommand::Invalid("empty command; type /help for commands".to_string()),
        _ => ChatCommand::Invalid(format!(
            "unknown command /{command}; type /help for commands"
        )),
    };

    Some(result)
}

/// Returns help text for available commands.
pub fn help_text() -> &'static str {
    r#"Type a question and press Enter to send it to the agent.
You can keep typing while earlier questions are still waiting.

Commands:
  /history           Show the whole conversation
  /stats             Show message and pending request counts
  /help, /?          Show this help message
  /quit, /exit, /q   Exit the chat

Ctrl+D also exits."#
}
