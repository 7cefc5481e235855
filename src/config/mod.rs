mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from_path(&config_path).await
}

pub async fn load_from_path(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    apply_env_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Lets deployments keep the API key out of the config file. A non-empty
/// provider-specific environment variable wins over the file value.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = env::var(config.vision.provider.api_key_env()) {
        if !key.is_empty() {
            debug!(
                "Using API key from {}",
                config.vision.provider.api_key_env()
            );
            config.vision.api_key = key;
        }
    }
}
