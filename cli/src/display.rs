//! Plain-text rendering of output items for the terminal.

use relay::OutputItem;

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
/// `max == 0` disables truncation.
pub fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let content: String = s.chars().take(max - SUFFIX.len()).collect();
    format!("{content}{SUFFIX}")
}

/// Node markers (`<name>node</name>`) render as `Entering: node`.
fn marker_node(text: &str) -> Option<&str> {
    text.strip_prefix("<name>")?.strip_suffix("</name>")
}

/// One line per item; tool payloads are truncated to `max` chars.
pub fn format_item(item: &OutputItem, max: usize) -> String {
    match item {
        OutputItem::Message { role, .. } => {
            let text = item.message_text().unwrap_or_default();
            match marker_node(&text) {
                Some(node) => format!("Entering: {node}"),
                None if role == "assistant" => text,
                None => format!("{role}: {text}"),
            }
        }
        OutputItem::FunctionCall {
            name, arguments, ..
        } => format!("-> {name}({})", truncate_display(arguments, max)),
        OutputItem::FunctionCallOutput { call_id, output } => {
            format!("<- [{call_id}] {}", truncate_display(output, max))
        }
        OutputItem::Reasoning { summary, .. } => {
            let text: Vec<&str> = summary.iter().map(|s| s.text.as_str()).collect();
            format!("(reasoning) {}", truncate_display(&text.join(" "), max))
        }
    }
}
