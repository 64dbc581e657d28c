// Configuration module

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    ///
    /// The Gemini API key additionally falls back to the bare
    /// `GOOGLE_AI_API_KEY` environment variable, matching how the hosted
    /// deployment is provisioned.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default()).map_err(|e| GatewayError::Config(e.to_string()))?)
            // Load from config file if it exists
            .add_source(
                File::with_name(&Self::default_config_path())
                    .required(false)
            )
            // Override with environment variables (prefix: ANH2PROMPT_)
            .add_source(
                Environment::with_prefix("ANH2PROMPT")
                    .separator("__")
            )
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        if config.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var("GOOGLE_AI_API_KEY") {
                config.gemini.api_key = key;
            }
        }

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".anh2prompt")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
