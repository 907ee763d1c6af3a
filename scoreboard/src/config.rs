use gateway::config::Listener;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use store::config::StoreConfig;

/// Statsd sink settings; metrics are disabled when the section is absent.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

/// Service configuration, read once at startup.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub listener: Listener,
    pub store: StoreConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Config {
    /// Load from a YAML file when given, defaults otherwise; the
    /// `VALKEY_*` environment variables override the store section either
    /// way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.store.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listener.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("invalid listener config: {0}")]
    InvalidListener(#[from] gateway::config::ValidationError),
    #[error("invalid store config: {0}")]
    InvalidStore(#[from] store::config::ValidationError),
}
