//! Line input for the chat application.
//!
//! `rustyline` blocks, so the editor lives on its own thread and hands lines
//! to the async chat loop over a channel.  After each line the thread waits
//! for the loop to call [`LineReader::resume`] before drawing the prompt
//! again; if the loop goes away instead, the thread exits without putting the
//! terminal back into raw mode.

use std::sync::mpsc as std_mpsc;
use std::thread;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};
use tokio::sync::mpsc;

use crate::error::Result;

/// Something that happened at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line of input, without the trailing newline and untrimmed.
    Line(String),

    /// Ctrl+C at the prompt.
    Interrupted,

    /// Ctrl+D at the prompt.  No more events follow.
    Eof,

    /// The editor failed.  No more events follow.
    Failed(String),
}

/// Handle to the input thread.
pub struct LineReader {
    events: mpsc::Receiver<InputEvent>,
    resume: std_mpsc::Sender<()>,
    printer: Option<Box<dyn ExternalPrinter + Send>>,
}

impl LineReader {
    /// Spawns the input thread, showing `prompt` before every line.
    pub fn spawn(prompt: impl Into<String>) -> Result<Self> {
        let prompt = prompt.into();
        let (event_tx, events) = mpsc::channel(1);
        let (resume, resume_rx) = std_mpsc::channel();
        let (printer_tx, printer_rx) = std_mpsc::channel();

        thread::Builder::new()
            .name("agent-chat-input".to_string())
            .spawn(move || read_lines(prompt, event_tx, resume_rx, printer_tx))?;

        let printer = printer_rx.recv().ok().flatten();
        Ok(Self {
            events,
            resume,
            printer,
        })
    }

    /// Takes the printer that writes above the prompt, if the terminal has one.
    pub fn take_printer(&mut self) -> Option<Box<dyn ExternalPrinter + Send>> {
        self.printer.take()
    }

    /// Waits for the next event.  Returns `None` once the input thread is gone.
    pub async fn next(&mut self) -> Option<InputEvent> {
        self.events.recv().await
    }

    /// Lets the input thread show the prompt again.
    pub fn resume(&self) {
        let _ = self.resume.send(());
    }
}

fn read_lines(
    prompt: String,
    events: mpsc::Sender<InputEvent>,
    resume: std_mpsc::Receiver<()>,
    printer: std_mpsc::Sender<Option<Box<dyn ExternalPrinter + Send>>>,
) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            let _ = printer.send(None);
            let _ = events.blocking_send(InputEvent::Failed(err.to_string()));
            return;
        }
    };
    let external = match rl.create_external_printer() {
        Ok(p) => Some(Box::new(p) as Box<dyn ExternalPrinter + Send>),
        Err(err) => {
            tracing::debug!(error = %err, "no external printer; writing to stdout");
            None
        }
    };
    let _ = printer.send(external);

    loop {
        let event = match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                InputEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
            Err(ReadlineError::Eof) => InputEvent::Eof,
            Err(err) => InputEvent::Failed(err.to_string()),
        };
        let last = matches!(event, InputEvent::Eof | InputEvent::Failed(_));
        if events.blocking_send(event).is_err() || last {
            return;
        }
        if resume.recv().is_err() {
            return;
        }
    }
}
