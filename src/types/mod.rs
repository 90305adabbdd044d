// Public modules
pub mod conversation;
pub mod message;
pub mod query;

// Re-exports
pub use conversation::Conversation;
pub use message::{Message, Sender};
pub use query::{
    AGENT_ERROR_TEXT, NO_RESPONSE_TEXT, QueryRequest, is_blank, reply_text, response_text,
};
