//! Relay CLI library: replay recorded agent runs, inspect and call tools, show settings.
//!
//! The binary (`src/main.rs`) parses arguments and delegates here so commands can be tested
//! without spawning a process.

mod display;
mod replay;
mod tools;

pub use display::{format_item, truncate_display};
pub use replay::{replay, replay_events, ReplayOptions};
pub use tools::{call_tool, list_tools, show_tool, ToolShowFormat};

use thiserror::Error;

/// Errors reported by CLI commands; printed to stderr by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Transcript(#[from] relay::TranscriptError),
    #[error(transparent)]
    Relay(#[from] relay::RelayError),
    #[error(transparent)]
    Tool(#[from] relay::ToolSourceError),
    #[error("config: {0}")]
    Config(#[from] config::LoadError),
    #[error("invalid JSON for {what}: {source}")]
    InvalidJson {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("output: {0}")]
    Output(#[from] std::io::Error),
}

/// Parses a JSON argument given on the command line.
pub fn parse_json_arg(what: &'static str, raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|source| CliError::InvalidJson { what, source })
}

/// Settings as `KEY=value` lines, in the order they are documented.
pub fn settings_lines(settings: &config::Settings) -> Vec<String> {
    vec![
        format!("LLM_ENDPOINT_NAME={}", settings.llm_endpoint_name),
        format!("MLFLOW_TRACKING_URI={}", settings.mlflow_tracking_uri),
        format!("MLFLOW_REGISTRY_URI={}", settings.mlflow_registry_uri),
        format!("MLFLOW_EXPERIMENT_PATH={}", settings.mlflow_experiment_path),
        format!("UC_CATALOG={}", settings.uc_catalog),
        format!("UC_SCHEMA={}", settings.uc_schema),
        format!("UC_MODEL_NAME={}", settings.uc_model_name),
        format!("registered model: {}", settings.registered_model_name()),
    ]
}
