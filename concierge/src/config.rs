//! Environment-driven deployment configuration.
//!
//! `GROQ_API_KEY` is the only required variable. Tool vendor keys are
//! optional and gate which built-in tools get registered; everything else
//! has a deployment default.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use cprovider::groq::DEFAULT_GROQ_MODEL;
use cprovider::{GenerationSettings, SecretString, api_key_from_env};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ConciergeConfig {
    pub groq_api_key: SecretString,
    pub tavily_api_key: Option<SecretString>,
    pub openweather_api_key: Option<SecretString>,
    pub aviationstack_api_key: Option<SecretString>,
    pub model: String,
    pub settings: GenerationSettings,
    pub max_search_results: usize,
    pub tool_worker_limit: usize,
    pub tool_call_timeout: Duration,
    pub session_max_idle: Duration,
}

impl ConciergeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq_api_key =
            api_key_from_env("GROQ_API_KEY").map_err(|err| ConfigError::new(err.message))?;

        let settings = GenerationSettings {
            temperature: parse_or_default(env_value("TEMPERATURE"), "TEMPERATURE", 0.7)?,
            top_p: parse_or_default(env_value("TOP_P"), "TOP_P", 0.9)?,
            max_completion_tokens: parse_or_default(
                env_value("MAX_COMPLETION_TOKENS"),
                "MAX_COMPLETION_TOKENS",
                1000,
            )?,
            ..GenerationSettings::default()
        };

        Ok(Self {
            groq_api_key,
            tavily_api_key: optional_key("TAVILY_API_KEY"),
            openweather_api_key: optional_key("OPENWEATHER_API_KEY"),
            aviationstack_api_key: optional_key("AVIATIONSTACK_API_KEY"),
            model: env_value("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            settings,
            max_search_results: parse_or_default(
                env_value("MAX_SEARCH_RESULTS"),
                "MAX_SEARCH_RESULTS",
                5,
            )?,
            tool_worker_limit: parse_or_default(
                env_value("TOOL_WORKER_LIMIT"),
                "TOOL_WORKER_LIMIT",
                4,
            )?,
            tool_call_timeout: Duration::from_secs(parse_or_default(
                env_value("TOOL_TIMEOUT_SECS"),
                "TOOL_TIMEOUT_SECS",
                10,
            )?),
            session_max_idle: Duration::from_secs(parse_or_default(
                env_value("SESSION_MAX_IDLE_SECS"),
                "SESSION_MAX_IDLE_SECS",
                24 * 60 * 60,
            )?),
        })
    }
}

fn env_value(variable: &str) -> Option<String> {
    std::env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn optional_key(variable: &str) -> Option<SecretString> {
    env_value(variable).map(SecretString::new)
}

fn parse_or_default<T>(value: Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::new(format!("{name} has an unparseable value: {raw}"))),
    }
}
