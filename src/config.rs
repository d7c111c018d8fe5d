//! Runtime configuration read from the environment (and `.env` via dotenvy).

use std::env;
use std::time::Duration;

const DEFAULT_MODEL_NAME: &str = "gemini-pro";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub model_name: String,
    pub gemini_base_url: String,
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let gemini_api_key = value("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let cors_origins = parse_origins(
            &value("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        )?;

        let port = match value("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match value("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "GEMINI_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            gemini_api_key,
            model_name: value("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            gemini_base_url: value("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            cors_origins,
            host: value("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

    if let Some(bad) = origins.iter().find(|origin| {
        origin.as_str() != "*" && !(origin.starts_with("http://") || origin.starts_with("https://"))
    }) {
        return Err(ConfigError::Invalid {
            key: "CORS_ORIGINS",
            value: bad.clone(),
        });
    }
    Ok(origins)
}
