mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::{debug, info};

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path).await?;
    let config = apply_api_url_override(config, env::var("API_URL").ok());
    config.validate()?;

    Ok(config)
}

/// Reads the YAML file at `path`. A missing file yields the defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        info!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// `API_URL` wins over the file. An empty value is treated as unset.
pub fn apply_api_url_override(mut config: Config, api_url: Option<String>) -> Config {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        debug!("Prediction API URL overridden from environment: {}", url);
        config.api.url = url;
    }
    config
}
