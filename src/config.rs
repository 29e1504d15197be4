use serde::{Deserialize, Serialize};

use crate::clients::openai::DEFAULT_BASE_URL;
use crate::error::{NarrativeError, Result};

/// Main configuration structure loaded from narrative_analysis.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Completion service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
    /// Extra attempts for transient failures; 0 disables the retry wrapper.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 60_000,
            max_retries: 0,
            retry_base_delay_ms: 500,
        }
    }
}

impl CompletionConfig {
    /// Apply NARRATIVE_* environment overrides (env-first)
    pub fn apply_env(&mut self) {
        if let Ok(model) = std::env::var("NARRATIVE_MODEL")
            && !model.trim().is_empty()
        {
            self.model = model;
        }
        if let Ok(url) = std::env::var("NARRATIVE_BASE_URL")
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        if let Some(ms) = std::env::var("NARRATIVE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.timeout_ms = ms;
        }
        if let Some(n) = std::env::var("NARRATIVE_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.max_retries = n;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(config_error("completion.model must not be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(config_error(format!(
                "completion.base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(config_error("completion.timeout_ms must be > 0"));
        }
        if self.max_retries > 10 {
            return Err(config_error("completion.max_retries must be at most 10"));
        }
        Ok(())
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub openai_api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            log_level: "narrative_analysis=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        let mut cfg = Self::default();
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !is_placeholder(k));
        if let Ok(level) = std::env::var("NARRATIVE_LOG").or_else(|_| std::env::var("RUST_LOG"))
            && !level.trim().is_empty()
        {
            cfg.log_level = level;
        }
        cfg
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| config_error("OPENAI_API_KEY is not set"))
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses NARRATIVE_CONFIG environment variable or defaults to "narrative_analysis.toml"
    pub fn load() -> Result<Self> {
        load_env_file();

        let config_path = std::env::var("NARRATIVE_CONFIG")
            .unwrap_or_else(|_| "narrative_analysis.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.completion.apply_env();
        config.runtime = RuntimeConfig::load_from_env();

        if std::env::var("NARRATIVE_MODEL").is_ok() {
            tracing::debug!("NARRATIVE_MODEL env override applied");
        }

        config.completion.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replace the model (e.g. from a CLI flag) and re-validate.
    pub fn override_model(&mut self, model: impl Into<String>) -> Result<()> {
        self.completion.model = model.into();
        self.completion.validate()
    }
}

/// Load `.env` from NARRATIVE_ENV_FILE if set, else ./.env. Missing files are ignored.
pub fn load_env_file() {
    if let Ok(env_path) = std::env::var("NARRATIVE_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::from_path(".env");
    }
}

fn config_error(message: impl Into<String>) -> NarrativeError {
    NarrativeError::Config {
        message: message.into(),
    }
}

fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.completion.validate().is_ok());
        assert_eq!(config.completion.max_retries, 0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
[completion]
model = "gpt-4"
max_retries = 2
"#,
        )
        .unwrap();
        assert_eq!(config.completion.model, "gpt-4");
        assert_eq!(config.completion.max_retries, 2);
        assert_eq!(config.completion.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.completion.timeout_ms, 60_000);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.completion.model, "gpt-4o-mini");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[completion\nmodel=").unwrap_err();
        assert!(matches!(err, NarrativeError::Config { .. }));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut c = CompletionConfig {
            model: " ".into(),
            ..Default::default()
        };
        assert!(c.validate().is_err());
        c.model = "m".into();
        c.base_url = "ftp://x".into();
        assert!(c.validate().is_err());
        c.base_url = "http://localhost:8080/v1".into();
        c.timeout_ms = 0;
        assert!(c.validate().is_err());
        c.timeout_ms = 10;
        c.max_retries = 11;
        assert!(c.validate().is_err());
        c.max_retries = 3;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn model_override_is_validated() {
        let mut config = Config::default();
        assert!(config.override_model("gpt-4").is_ok());
        assert_eq!(config.completion.model, "gpt-4");

        let err = config.override_model("").unwrap_err();
        assert!(matches!(err, NarrativeError::Config { .. }));
        assert!(err.to_string().contains("completion.model must not be empty"));
    }

    #[test]
    fn placeholder_keys_ignored() {
        assert!(is_placeholder("your-api-key-here"));
        assert!(is_placeholder("${OPENAI_API_KEY}"));
        assert!(!is_placeholder("sk-abc"));
    }
}
