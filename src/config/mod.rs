mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Builds the process configuration: optional YAML file at `CONFIG_PATH`
/// (default `config.yaml`), then environment overrides, then validation.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => {
            debug!("Loading configuration from: {}", config_path);
            from_yaml(&config_str)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    validate(&config)?;

    Ok(config)
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// `PORT`, `FIREWORKS_API_KEY` and `LLM_BASE_URL` win over the file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    if let Some(api_key) = lookup("FIREWORKS_API_KEY") {
        config.llm.api_key = api_key;
    }

    if let Some(base_url) = lookup("LLM_BASE_URL") {
        config.llm.base_url = base_url;
    }

    Ok(())
}

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(
            "Provider API key is missing; set FIREWORKS_API_KEY or llm.api_key",
        ));
    }

    if config.server.body_limit_mb < MIN_BODY_LIMIT_MB {
        return Err(Error::config(format!(
            "server.body_limit_mb must be at least {} (got {})",
            MIN_BODY_LIMIT_MB, config.server.body_limit_mb
        )));
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(Error::config(format!(
            "llm.temperature must be within [0, 2] (got {})",
            config.llm.temperature
        )));
    }

    if config.llm.timeout_secs == 0 {
        return Err(Error::config("llm.timeout_secs must be greater than zero"));
    }

    Ok(())
}
