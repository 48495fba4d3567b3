//! Application settings
//!
//! Layered configuration: `config/default.toml` first, then `SCOUT_*`
//! environment variables (e.g. `SCOUT_BACKEND__MODEL`). The backend API key
//! may also come from the plain `SCOUT_API_KEY` variable, handled by the
//! provider itself.

use config::{Config, Environment, File};
use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_planner_timeout_secs() -> u64 {
    60
}

fn default_step_timeout_secs() -> u64 {
    120
}

fn default_tool_timeout_secs() -> u64 {
    10
}

/// Reasoning backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// API key (falls back to the SCOUT_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: Option<String>,
    /// Model name
    pub model: Option<String>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Orchestrator timeout settings
#[derive(Debug, Clone, Deserialize)]
pub struct OrchestratorSettings {
    /// Planner call timeout in seconds
    #[serde(default = "default_planner_timeout_secs")]
    pub planner_timeout_secs: u64,
    /// Per-step handler timeout in seconds
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,
    /// Per-tool-call timeout in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            planner_timeout_secs: default_planner_timeout_secs(),
            step_timeout_secs: default_step_timeout_secs(),
            tool_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

/// Top-level application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Reasoning backend settings
    #[serde(default)]
    pub backend: BackendSettings,
    /// Orchestrator settings
    #[serde(default)]
    pub orchestrator: OrchestratorSettings,
}

impl Settings {
    /// Load settings from config files and environment
    pub fn load() -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("SCOUT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend.request_timeout_secs, 60);
        assert_eq!(settings.orchestrator.planner_timeout_secs, 60);
        assert_eq!(settings.orchestrator.step_timeout_secs, 120);
        assert_eq!(settings.orchestrator.tool_timeout_secs, 10);
        assert!(settings.backend.api_key.is_none());
    }
}
