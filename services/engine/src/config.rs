//! services/engine/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Could not read the system instruction at {}: {1}", .0.display())]
    UnreadableResource(PathBuf, String),
    #[error("Could not construct the generation HTTP client: {0}")]
    HttpClient(String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub prompts_path: PathBuf,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub generation_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./prompts"));

        // --- Generative Endpoint Settings ---
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))?;

        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        let gemini_model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-lite".to_string());

        let timeout_str =
            std::env::var("GENERATION_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "GENERATION_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a number of seconds", timeout_str),
            )
        })?;

        Ok(Self {
            log_level,
            prompts_path,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            generation_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
