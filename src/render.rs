//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the chat loop
//! does not care whether bubbles go to a plain stdout or through the line
//! editor's printer while a prompt is active.

use std::io::{self, Stdout, Write};

use rustyline::ExternalPrinter;

use crate::types::{Message, Sender};

/// ANSI escape code for bold text (used for sender labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user's label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the agent's label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print one chat bubble.
    fn print_message(&mut self, message: &Message);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print every message of a conversation, oldest first.
    fn print_conversation(&mut self, messages: &[Message]) {
        for message in messages {
            self.print_message(message);
        }
    }
}

/// Formats a chat bubble as a single line of text.
///
/// The label is `You` or `Agent`, as in `Agent: 4`.
pub fn format_message(message: &Message, use_color: bool) -> String {
    let label = message.sender().label();
    if use_color {
        let color = match message.sender() {
            Sender::User => ANSI_CYAN,
            Sender::Bot => ANSI_GREEN,
        };
        format!(
            "{ANSI_BOLD}{color}{label}:{ANSI_RESET} {}",
            message.text()
        )
    } else {
        format!("{label}: {}", message.text())
    }
}

enum Output {
    Stdout(Stdout),
    Printer(Box<dyn ExternalPrinter + Send>),
}

/// Plain text renderer with optional ANSI styling.
///
/// Writes to stdout, or through a line editor's external printer so output
/// that arrives while the prompt is showing does not clobber the input line.
pub struct PlainTextRenderer {
    output: Output,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            output: Output::Stdout(io::stdout()),
            use_color,
        }
    }

    /// Creates a renderer that prints through a line editor.
    pub fn with_printer(printer: Box<dyn ExternalPrinter + Send>, use_color: bool) -> Self {
        Self {
            output: Output::Printer(printer),
            use_color,
        }
    }

    fn emit(&mut self, line: String) {
        match &mut self.output {
            Output::Stdout(stdout) => {
                let _ = writeln!(stdout, "{line}");
                let _ = stdout.flush();
            }
            Output::Printer(printer) => {
                if let Err(err) = printer.print(format!("{line}\n")) {
                    tracing::debug!(error = %err, "external printer failed; using stdout");
                    println!("{line}");
                }
            }
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        let line = format_message(message, self.use_color);
        self.emit(line);
    }

    fn print_error(&mut self, error: &str) {
        let line = if self.use_color {
            format!("{ANSI_RED}Error: {error}{ANSI_RESET}")
        } else {
            format!("Error: {error}")
        };
        self.emit(line);
    }

    fn print_info(&mut self, info: &str) {
        self.emit(info.to_string());
    }
}
