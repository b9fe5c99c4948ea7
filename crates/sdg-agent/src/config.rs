//! Agent settings loaded from TOML and environment variables.
//!
//! ```toml
//! [agent]
//! name = "SDGAgent"
//! session_id = "session-42"
//! user_id = "user-7"
//! prompt_preset = "full"
//!
//! [completion]
//! endpoint = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! timeout_secs = 60
//! max_retries = 3
//! ```
//!
//! Environment variables override values from the file.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::completion::RetryPolicy;
use crate::prompts::PromptPreset;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {key}: {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No system prompt available: set a preset or a non-blank override")]
    MissingSystemPrompt,

    #[error("No completion client configured")]
    MissingCompletionClient,

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Complete settings for one agent process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub agent: AgentSection,
    pub completion: CompletionSection,
}

/// `[agent]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub name: String,
    pub session_id: String,
    pub user_id: String,
    /// `None` disables the built-in prompts; a `system_prompt` is then required.
    pub prompt_preset: Option<PromptPreset>,
    pub system_prompt: Option<String>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            name: "SDGAgent".to_string(),
            session_id: String::new(),
            user_id: String::new(),
            prompt_preset: Some(PromptPreset::Full),
            system_prompt: None,
        }
    }
}

/// `[completion]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSection {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for CompletionSection {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            max_tokens: None,
            timeout_secs: 60,
            max_retries: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl CompletionSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
            ..RetryPolicy::default()
        }
    }
}

impl AgentSettings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let settings = base.with_overrides(|key| env::var(key).ok())?;
        tracing::debug!(
            agent = %settings.agent.name,
            model = %settings.completion.model,
            "Loaded agent settings"
        );
        Ok(settings)
    }

    /// Apply `SDG_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("SDG_AGENT_NAME") {
            self.agent.name = name;
        }
        if let Some(session_id) = lookup("SDG_SESSION_ID") {
            self.agent.session_id = session_id;
        }
        if let Some(user_id) = lookup("SDG_USER_ID") {
            self.agent.user_id = user_id;
        }
        if let Some(preset) = lookup("SDG_PROMPT_PRESET") {
            self.agent.prompt_preset = match preset.trim().to_lowercase().as_str() {
                "none" | "" => None,
                other => Some(other.parse().map_err(|message| ConfigError::InvalidEnvVar {
                    key: "SDG_PROMPT_PRESET".to_string(),
                    message,
                })?),
            };
        }
        if let Some(prompt) = lookup("SDG_SYSTEM_PROMPT") {
            self.agent.system_prompt = Some(prompt);
        }

        if let Some(endpoint) = lookup("SDG_COMPLETION_ENDPOINT") {
            self.completion.endpoint = endpoint;
        }
        if let Some(api_key) = lookup("SDG_COMPLETION_API_KEY") {
            self.completion.api_key = Some(api_key);
        }
        if let Some(model) = lookup("SDG_COMPLETION_MODEL") {
            self.completion.model = model;
        }
        if let Some(timeout) = parse_u64(&lookup, "SDG_COMPLETION_TIMEOUT_SECS")? {
            self.completion.timeout_secs = timeout;
        }
        if let Some(retries) = parse_u32(&lookup, "SDG_COMPLETION_MAX_RETRIES")? {
            self.completion.max_retries = retries;
        }

        self.validate()?;
        Ok(self)
    }

    /// The system prompt these settings select, if any.
    ///
    /// A non-blank override wins over the preset.
    pub fn system_prompt(&self) -> Result<String, ConfigError> {
        select_system_prompt(self.agent.system_prompt.as_deref(), self.agent.prompt_preset)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agent name must not be empty".to_string(),
            ));
        }
        if self.completion.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "completion timeout must be at least one second".to_string(),
            ));
        }
        if let Some(t) = self
            .completion
            .temperature
            .filter(|t| !(0.0..=2.0).contains(t))
        {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be within 0.0..=2.0, got {t}"
            )));
        }
        Ok(())
    }
}

/// Pick the system prompt from an override and a preset.
///
/// A non-blank override wins. A blank override is an error even when a
/// preset is set.
pub fn select_system_prompt(
    override_prompt: Option<&str>,
    preset: Option<PromptPreset>,
) -> Result<String, ConfigError> {
    match (override_prompt, preset) {
        (Some(prompt), _) if !prompt.trim().is_empty() => Ok(prompt.to_string()),
        (Some(_), _) | (None, None) => Err(ConfigError::MissingSystemPrompt),
        (None, Some(preset)) => Ok(preset.text().to_string()),
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid u64 value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}

fn parse_u32<F>(lookup: &F, key: &str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid u32 value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_select_full_prompt() {
        let settings = AgentSettings::default();
        assert_eq!(settings.agent.name, "SDGAgent");
        assert_eq!(settings.agent.prompt_preset, Some(PromptPreset::Full));
        assert_eq!(
            settings.system_prompt().unwrap(),
            PromptPreset::Full.text()
        );
    }

    #[test]
    fn parses_partial_toml() {
        let settings = AgentSettings::from_toml(
            r#"
            [agent]
            session_id = "s-1"
            prompt_preset = "condensed"

            [completion]
            model = "local-model"
            max_retries = 0
            "#,
        )
        .unwrap();

        assert_eq!(settings.agent.name, "SDGAgent");
        assert_eq!(settings.agent.session_id, "s-1");
        assert_eq!(settings.agent.prompt_preset, Some(PromptPreset::Condensed));
        assert_eq!(settings.completion.model, "local-model");
        assert_eq!(settings.completion.retry_policy().max_retries, 0);
        assert_eq!(settings.completion.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_unknown_preset_in_toml() {
        let err = AgentSettings::from_toml("[agent]\nprompt_preset = \"tiny\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nname = \"FileAgent\"").unwrap();

        let settings = AgentSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.agent.name, "FileAgent");

        let missing = AgentSettings::from_file("/nonexistent/sdg.toml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn environment_overrides_file_values() {
        let settings = AgentSettings::from_toml("[agent]\nname = \"FromFile\"\n")
            .unwrap()
            .with_overrides(vars(&[
                ("SDG_AGENT_NAME", "FromEnv"),
                ("SDG_USER_ID", "u-9"),
                ("SDG_COMPLETION_TIMEOUT_SECS", "5"),
                ("SDG_COMPLETION_MAX_RETRIES", "1"),
            ]))
            .unwrap();

        assert_eq!(settings.agent.name, "FromEnv");
        assert_eq!(settings.agent.user_id, "u-9");
        assert_eq!(settings.completion.timeout_secs, 5);
        assert_eq!(settings.completion.max_retries, 1);
    }

    #[test]
    fn invalid_numbers_are_reported_with_their_key() {
        let err = AgentSettings::default()
            .with_overrides(vars(&[("SDG_COMPLETION_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidEnvVar { key, .. } => {
                assert_eq!(key, "SDG_COMPLETION_TIMEOUT_SECS")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn disabled_preset_requires_override() {
        let settings = AgentSettings::default()
            .with_overrides(vars(&[("SDG_PROMPT_PRESET", "none")]))
            .unwrap();
        assert!(matches!(
            settings.system_prompt(),
            Err(ConfigError::MissingSystemPrompt)
        ));

        let settings = settings
            .with_overrides(vars(&[("SDG_SYSTEM_PROMPT", "Custom brief")]))
            .unwrap();
        assert_eq!(settings.system_prompt().unwrap(), "Custom brief");
    }

    #[test]
    fn blank_override_is_rejected() {
        let mut settings = AgentSettings::default();
        settings.agent.system_prompt = Some("   ".to_string());
        assert!(matches!(
            settings.system_prompt(),
            Err(ConfigError::MissingSystemPrompt)
        ));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let err = AgentSettings::from_toml("[completion]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
