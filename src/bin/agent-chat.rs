//! Interactive chat with a query/response agent.
//!
//! Each line typed at the prompt is POSTed as `{"query": ...}` to the agent's
//! `/query` endpoint and the `response` field of the reply is printed as the
//! agent's bubble.  The prompt stays usable while replies are pending.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the default agent
//! agent-chat
//!
//! # Talk to an agent running elsewhere
//! agent-chat --endpoint http://localhost:5000
//!
//! # Disable colors (useful for piping output)
//! agent-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/history` - Show the whole conversation
//! - `/stats` - Show message and pending request counts
//! - `/quit` - Exit the application
//!
//! Set `RUST_LOG` (for example `RUST_LOG=agent_chat=debug`) to see why a
//! request failed.

use arrrg::CommandLine;
use tracing_subscriber::EnvFilter;

use agent_chat::AgentClient;
use agent_chat::chat::{
    ChatArgs, ChatConfig, ChatSession, ChatView, InputEvent, LineReader, PlainTextRenderer,
    Renderer, Step,
};

/// Main entry point for the agent-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("agent-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "agent_chat=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = AgentClient::with_options(Some(&config.endpoint), config.timeout)?;
    tracing::info!(endpoint = %client.endpoint(), "starting chat");

    println!("Agent Chat ({})", client.endpoint());
    println!("Type /help for commands, /quit to exit\n");

    let mut session = ChatSession::new(ChatView::new(client));
    let mut input = LineReader::spawn("You: ")?;
    let mut renderer = match input.take_printer() {
        Some(printer) => PlainTextRenderer::with_printer(printer, config.use_color),
        None => PlainTextRenderer::with_color(config.use_color),
    };

    let finish_pending = loop {
        tokio::select! {
            Some(reply) = session.next_reply(), if session.pending_count() > 0 => {
                renderer.print_message(&reply);
            }
            event = input.next() => match event {
                Some(InputEvent::Line(line)) => {
                    if session.handle_line(&line, &mut renderer) == Step::Quit {
                        break false;
                    }
                    input.resume();
                }
                Some(InputEvent::Interrupted) => {
                    // Ctrl+C at prompt - soft interrupt
                    input.resume();
                }
                // End of input (for example a piped script) waits for the answers.
                Some(InputEvent::Eof) | None => break true,
                Some(InputEvent::Failed(err)) => {
                    renderer.print_error(&format!("Input error: {}", err));
                    break false;
                }
            },
        }
    };

    // The prompt is gone; print straight to stdout from here on.
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    if session.pending_count() > 0 {
        if finish_pending {
            tracing::debug!(pending = session.pending_count(), "waiting for replies");
            while let Some(reply) = session.next_reply().await {
                renderer.print_message(&reply);
            }
        } else {
            tracing::debug!(
                pending = session.pending_count(),
                "exiting with replies still in flight"
            );
        }
    }
    renderer.print_info("Goodbye!");
    Ok(())
}
