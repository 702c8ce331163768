//! Content normalization for model and tool output.
//!
//! Some models return their whole reply (reasoning trace plus answer) serialized into the
//! string content of one message. [`normalize_message`] detects that shape and keeps only the
//! first `text` part so downstream consumers always see renderable text.

use serde_json::{Map, Value};

use crate::message::{ContentPart, Message, MessageContent};

/// Outcome of inspecting string content.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedContent {
    /// The string is a JSON array of objects; each object is one loosely typed part.
    Structured(Vec<Map<String, Value>>),
    /// Anything else, including invalid JSON and arrays holding non-objects.
    PlainText,
}

/// Parses `raw` as a serialized part list.
///
/// Never fails: non-matching input is [`ParsedContent::PlainText`].
pub fn parse_content(raw: &str) -> ParsedContent {
    // Only a JSON array can be a part list.
    if !raw.trim_start().starts_with('[') {
        return ParsedContent::PlainText;
    }
    match serde_json::from_str::<Vec<Map<String, Value>>>(raw) {
        Ok(parts) => ParsedContent::Structured(parts),
        Err(_) => ParsedContent::PlainText,
    }
}

/// Returns the string `text` of the first `type == "text"` part that carries one.
fn first_text(parts: &[Map<String, Value>]) -> Option<&str> {
    parts
        .iter()
        .filter(|p| p.get("type").and_then(Value::as_str) == Some("text"))
        .find_map(|p| p.get("text").and_then(Value::as_str))
}

/// Normalizes one message (the caller's working copy).
///
/// - String content that is a serialized part list becomes the text of its first `text` part;
///   later parts (including reasoning) are dropped. Parts are inspected one by one, so a
///   malformed part does not hide a later well-formed one.
/// - A part list with no text part replaces the string with the parsed parts. If a part cannot
///   be read as a [`ContentPart`] (e.g. a non-string `text`), the string is kept.
/// - Plain text and already-structured content are returned unchanged.
pub fn normalize_message(mut message: Message) -> Message {
    let parsed = match &message.content {
        MessageContent::Text(raw) => parse_content(raw),
        MessageContent::Parts(_) => ParsedContent::PlainText,
    };
    let ParsedContent::Structured(parts) = parsed else {
        return message;
    };
    if let Some(text) = first_text(&parts) {
        message.content = MessageContent::Text(text.to_string());
        return message;
    }
    let typed: Result<Vec<ContentPart>, _> = parts
        .into_iter()
        .map(|p| serde_json::from_value(Value::Object(p)))
        .collect();
    match typed {
        Ok(parts) => message.content = MessageContent::Parts(parts),
        Err(e) => tracing::debug!(id = %message.id, error = %e, "part list kept as text"),
    }
    message
}
