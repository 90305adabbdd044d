use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Text shown when the agent answered without a usable `response` field.
pub const NO_RESPONSE_TEXT: &str = "No response.";

/// Text shown for every failure on the way to or from the agent.
pub const AGENT_ERROR_TEXT: &str = "⚠️ Error contacting agent";

/// Body of a `POST /query` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The user's text, untrimmed.
    pub query: String,
}

impl QueryRequest {
    /// Create a new `QueryRequest`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// The `response` field of an agent reply body, if it is truthy.
///
/// Only a JSON object's `response` field counts, and only when it is a
/// non-empty string, a non-zero number or `true`.
pub fn response_text(body: &Value) -> Option<String> {
    match body.get("response")? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number_text(number))
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn number_text(number: &Number) -> String {
    if number.is_f64() {
        // `f64` display drops the fractional part of whole numbers: 1.0 is "1".
        number.as_f64().map(|n| n.to_string()).unwrap_or_else(|| number.to_string())
    } else {
        number.to_string()
    }
}

/// Returns true if a draft has nothing but whitespace in it.
///
/// Whitespace is the set an HTML form's `trim()` removes: Unicode `White_Space`
/// plus the byte order mark U+FEFF, minus NEXT LINE U+0085.
pub fn is_blank(draft: &str) -> bool {
    draft
        .chars()
        .all(|c| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}'))
}

/// Extract the text to display from an agent reply body.
///
/// Anything without a usable `response` field, including a body that is not
/// an object, degrades to [`NO_RESPONSE_TEXT`].
pub fn reply_text(body: &Value) -> String {
    response_text(body).unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
}
