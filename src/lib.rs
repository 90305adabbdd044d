// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;

// Re-exports
pub use client::{Agent, AgentClient, DEFAULT_AGENT_URL};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
