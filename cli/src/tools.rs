//! `relay tool`: list, show and call the built-in investigation tools.

use relay::{SecurityToolsSource, ToolSource, ToolSourceError, ToolSpec};

use crate::{parse_json_arg, CliError};

/// Output format for `tool show`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolShowFormat {
    #[default]
    Yaml,
    Json,
}

pub async fn list_tools() -> Result<Vec<ToolSpec>, CliError> {
    Ok(SecurityToolsSource::new().list_tools().await?)
}

/// Full definition of one tool (name, description, input_schema).
pub async fn show_tool(name: &str, format: ToolShowFormat) -> Result<String, CliError> {
    let spec = list_tools()
        .await?
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
    Ok(match format {
        ToolShowFormat::Yaml => serde_yaml::to_string(&spec)?,
        ToolShowFormat::Json => serde_json::to_string_pretty(&spec)?,
    })
}

/// Calls `name` with `args` (a JSON object) and returns the tool's text result.
pub async fn call_tool(name: &str, args: &str) -> Result<String, CliError> {
    let args = parse_json_arg("--args", args)?;
    let result = SecurityToolsSource::new().call_tool(name, args).await?;
    Ok(result.text)
}
