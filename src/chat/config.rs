//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_AGENT_URL;

/// Command-line arguments for the agent-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the agent.
    #[arrrg(optional, "Agent base URL (default: http://172.27.152.214:3000/)", "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Base URL of the agent; queries go to `<endpoint>/query`.
    pub endpoint: String,

    /// Optional request timeout.  `None` waits for as long as the agent takes.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: http://172.27.152.214:3000/
    /// - Timeout: none
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_AGENT_URL.to_string(),
            timeout: None,
            use_color: true,
        }
    }

    /// Sets the agent base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            endpoint: args
                .endpoint
                .unwrap_or_else(|| DEFAULT_AGENT_URL.to_string()),
            timeout: args.timeout.map(Duration::from_secs),
            use_color: !args.no_color,
        }
    }
}
