use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_MAX_RETRY: u32 = 3;
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_LOG_FILE: &str = "study_buddy.log";

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Process-wide settings, read once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retry: u32,
    pub results_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_retry: DEFAULT_MAX_RETRY,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_retry = parse_or(
            value("QUIZ_MAX_RETRY"),
            "QUIZ_MAX_RETRY",
            defaults.max_retry,
        )?;
        if max_retry == 0 {
            return Err(ConfigError::InvalidValue {
                name: "QUIZ_MAX_RETRY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_key: value(API_KEY_VAR),
            model: value("QUIZ_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(
                value("QUIZ_TEMPERATURE"),
                "QUIZ_TEMPERATURE",
                defaults.temperature,
            )?,
            max_tokens: parse_or(
                value("QUIZ_MAX_TOKENS"),
                "QUIZ_MAX_TOKENS",
                defaults.max_tokens,
            )?,
            max_retry,
            results_dir: value("QUIZ_RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.results_dir),
            log_file: value("QUIZ_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        })
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}
