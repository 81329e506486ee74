use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use crate::ConfigError;
use std::path::Path;
use std::sync::Arc;

/// Environment variable overriding `storage.root`
pub const STORAGE_ROOT_ENV: &str = "FOLIO_STORAGE_ROOT";

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<folio_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        migrate_config_if_needed(path, events).await?;

        let content = tokio::fs::read_to_string(path).await?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::from)?;

        config.apply_storage_root_override(std::env::var(STORAGE_ROOT_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Replaces `storage.root` with a non-blank override value
    pub fn apply_storage_root_override(&mut self, value: Option<String>) {
        if let Some(root) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::info!("Storage root overridden by {}: {}", STORAGE_ROOT_ENV, root);
            self.storage.root = root;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.root.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("storage.root must not be empty".to_string()));
        }
        if self.storage.dir_mode > 0o777 {
            return Err(ConfigError::InvalidConfig(format!(
                "storage.dir_mode {:o} is not a permission mode",
                self.storage.dir_mode
            )));
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
