use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct CoffeeConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Not checked at startup; an empty or wrong key surfaces as a 401 on the
    /// first question.
    pub api_key: Secret<String>,
    pub base_url: String,
}

/// Parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl CoffeeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(CoffeeConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: Secret::new(get_env("OPENAI_API_KEY", "")),
                base_url: get_env("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            },
            completion: CompletionConfig {
                model: get_env("COFFEE_MODEL", DEFAULT_MODEL),
                max_tokens: parse_env("COFFEE_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                temperature: parse_env("COFFEE_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}
