//! Chat application module for talking to a query/response agent.
//!
//! This module provides the view controller that owns the conversation and a
//! REPL front end built on top of it.  It supports:
//!
//! - Several questions in flight at once, replies shown as they arrive
//! - ANSI-styled `You:` / `Agent:` bubbles
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`view`]: The conversation and draft state, and the submit handler
//! - [`session`]: Routes input lines to commands or the view
//! - [`input`]: Line editing on a dedicated thread
//! - [`commands`]: Slash command parsing
//! - [`config`]: CLI argument parsing and configuration

mod commands;
mod config;
mod input;
mod session;
mod view;

pub use crate::render::{PlainTextRenderer, Renderer, format_message};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use input::{InputEvent, LineReader};
pub use session::{ChatSession, SessionStats, Step};
pub use view::{ChatView, PendingReply};
