use anyhow::{bail, Result};
use std::str::FromStr;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,

    // Generation
    pub generation_temperature: f32,
    pub provider_timeout_secs: u64,

    // Server
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            generation_temperature: 1.0,
            provider_timeout_secs: 60,
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            // Gemini - a missing key is not fatal, every request falls back to the corpus
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_url: std::env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),

            // Generation
            generation_temperature: parse_or("GENERATION_TEMPERATURE", defaults.generation_temperature),
            provider_timeout_secs: parse_or("PROVIDER_TIMEOUT_SECS", defaults.provider_timeout_secs),

            // Server
            port: parse_or("PORT", defaults.port),
        };

        if !(0.0..=2.0).contains(&config.generation_temperature) {
            bail!(
                "GENERATION_TEMPERATURE must be between 0.0 and 2.0, got {}",
                config.generation_temperature
            );
        }
        if config.provider_timeout_secs == 0 {
            bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
