//! Process configuration, read once at startup

use crate::llm::{HarmBlockThreshold, SafetyPolicy};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

/// Everything the process needs, built once and passed down
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub safety: SafetyPolicy,
    pub tavily_api_key: String,
    pub tavily_base_url: Option<String>,
    pub port: u16,
    pub log_dir: PathBuf,
    pub cors_origins: CorsOrigins,
}

impl AppConfig {
    /// Load `.env` if present, then read the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal in production
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| non_empty(name).ok_or(ConfigError::Missing(name));

        let safety = match non_empty("GEMINI_SAFETY_THRESHOLD") {
            Some(value) => SafetyPolicy::new(HarmBlockThreshold::parse(&value).ok_or(
                ConfigError::Invalid {
                    name: "GEMINI_SAFETY_THRESHOLD",
                    value,
                },
            )?),
            None => SafetyPolicy::default(),
        };

        let port: u16 = match non_empty("CONVERSA_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "CONVERSA_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL"),
            safety,
            tavily_api_key: required("TAVILY_API_KEY")?,
            tavily_base_url: non_empty("TAVILY_BASE_URL"),
            port,
            log_dir: non_empty("CONVERSA_LOG_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_LOG_DIR), PathBuf::from),
            cors_origins: non_empty("CORS_ORIGINS")
                .map_or(CorsOrigins::Any, |v| CorsOrigins::parse(&v)),
        })
    }
}
