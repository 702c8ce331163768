//! Typed deployment settings resolved from environment variables.

use serde::Serialize;

/// Deployment settings for a Relay-wrapped agent.
///
/// Each field reads the environment variable of the same name in upper case; unset or
/// empty variables fall back to [`Settings::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Serving endpoint of the chat model the agent graph calls.
    pub llm_endpoint_name: String,
    pub mlflow_tracking_uri: String,
    pub mlflow_registry_uri: String,
    /// Experiment under which runs are logged.
    pub mlflow_experiment_path: String,
    pub uc_catalog: String,
    pub uc_schema: String,
    pub uc_model_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_endpoint_name: "databricks-gpt-oss-120b".to_string(),
            mlflow_tracking_uri: "databricks".to_string(),
            mlflow_registry_uri: "databricks-uc".to_string(),
            mlflow_experiment_path: "/Shared/cybersecurity-agent-exp".to_string(),
            uc_catalog: "workspace".to_string(),
            uc_schema: "default".to_string(),
            uc_model_name: "cybersecurity_agent".to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; used by [`Settings::from_env`] and tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let d = Self::default();
        Self {
            llm_endpoint_name: get("LLM_ENDPOINT_NAME", d.llm_endpoint_name),
            mlflow_tracking_uri: get("MLFLOW_TRACKING_URI", d.mlflow_tracking_uri),
            mlflow_registry_uri: get("MLFLOW_REGISTRY_URI", d.mlflow_registry_uri),
            mlflow_experiment_path: get("MLFLOW_EXPERIMENT_PATH", d.mlflow_experiment_path),
            uc_catalog: get("UC_CATALOG", d.uc_catalog),
            uc_schema: get("UC_SCHEMA", d.uc_schema),
            uc_model_name: get("UC_MODEL_NAME", d.uc_model_name),
        }
    }

    /// Three-level registry name: `catalog.schema.model`.
    pub fn registered_model_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.uc_catalog, self.uc_schema, self.uc_model_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_nothing_set() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s, Settings::default());
        assert_eq!(
            s.registered_model_name(),
            "workspace.default.cybersecurity_agent"
        );
    }

    #[test]
    fn lookup_overrides_and_blank_falls_back() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LLM_ENDPOINT_NAME", "databricks-gpt-oss-20b"),
            ("UC_CATALOG", "main"),
            ("UC_SCHEMA", "   "),
        ]);
        let s = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(s.llm_endpoint_name, "databricks-gpt-oss-20b");
        assert_eq!(s.uc_catalog, "main");
        assert_eq!(s.uc_schema, "default");
        assert_eq!(
            s.registered_model_name(),
            "main.default.cybersecurity_agent"
        );
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let v = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(v["mlflow_registry_uri"], "databricks-uc");
    }
}
