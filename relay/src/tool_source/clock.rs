//! `get_current_time`: current UTC time, RFC 3339 by default.

use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use super::{Tool, ToolCallContent, ToolSourceError, ToolSpec};

pub const TOOL_GET_CURRENT_TIME: &str = "get_current_time";

/// Formats `now` with a strftime pattern, or RFC 3339 when `format` is `None`.
pub fn format_time(now: DateTime<Utc>, format: Option<&str>) -> Result<String, ToolSourceError> {
    let Some(format) = format else {
        return Ok(now.to_rfc3339());
    };
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ToolSourceError::InvalidInput(format!(
            "invalid time format: {format}"
        )));
    }
    let formatted = now.format_with_items(StrftimeItems::new(format));
    Ok(formatted.to_string())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        TOOL_GET_CURRENT_TIME
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_GET_CURRENT_TIME.to_string(),
            description: Some("Get the current UTC date and time.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "description": "Optional strftime pattern, e.g. %Y-%m-%d %H:%M:%S"
                    }
                }
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let format = match args.get("format") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                return Err(ToolSourceError::InvalidInput(format!(
                    "format must be a string, got {other}"
                )));
            }
        };
        let text = format_time(Utc::now(), format)?;
        Ok(ToolCallContent { text })
    }
}
