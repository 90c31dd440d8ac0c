//! Agent configuration: explicit struct instead of ambient env reads.
//!
//! Everything the graph builder needs lives in [`AgentConfig`]. `from_env`
//! loads `.env` first and then reads the `OPENAI_*` / `AGENT_*` variables;
//! every field has a default so a bare environment still yields a usable
//! config (the OpenAI client itself will fail later without an API key).

use tracing::warn;

use crate::graph::DEFAULT_STEP_LIMIT;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Supervisor answer rounds allowed per run before the supervisor finishes.
pub const DEFAULT_MAX_TURNS: u32 = 3;

/// Agent configuration. Built explicitly or via [`AgentConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Chat model name for both supervisor and expert.
    pub model: String,
    /// OpenAI API key; `None` falls back to the client's own env lookup.
    pub api_key: Option<String>,
    /// Custom API base URL (proxies, compatible servers).
    pub api_base: Option<String>,
    /// Sampling temperature; `None` leaves the API default.
    pub temperature: Option<f32>,
    /// Expert answer rounds before the supervisor force-finishes.
    pub max_turns: u32,
    /// Graph step limit per run.
    pub step_limit: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: None,
            temperature: None,
            max_turns: DEFAULT_MAX_TURNS,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl AgentConfig {
    /// Loads `.env` (if present) and builds config from environment variables:
    /// `OPENAI_MODEL`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
    /// `OPENAI_TEMPERATURE`, `AGENT_MAX_TURNS`, `AGENT_STEP_LIMIT`.
    /// Missing or invalid values fall back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();
        Self {
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            api_base: std::env::var("OPENAI_BASE_URL").ok(),
            temperature: parse_env("OPENAI_TEMPERATURE"),
            max_turns: parse_env("AGENT_MAX_TURNS").unwrap_or(defaults.max_turns),
            step_limit: parse_env("AGENT_STEP_LIMIT").unwrap_or(defaults.step_limit),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "invalid value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Default config uses the default model and limits.
    #[test]
    fn default_config_values() {
        let c = AgentConfig::default();
        assert_eq!(c.model, DEFAULT_MODEL);
        assert_eq!(c.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(c.step_limit, DEFAULT_STEP_LIMIT);
        assert!(c.api_key.is_none());
        assert!(c.temperature.is_none());
    }

    /// **Scenario**: parse_env returns None for missing or invalid values.
    #[test]
    fn parse_env_invalid_is_none() {
        assert_eq!(parse_env::<u32>("COUNSEL_TEST_UNSET_VAR"), None);
        std::env::set_var("COUNSEL_TEST_BAD_U32", "not-a-number");
        assert_eq!(parse_env::<u32>("COUNSEL_TEST_BAD_U32"), None);
        std::env::remove_var("COUNSEL_TEST_BAD_U32");
    }
}
