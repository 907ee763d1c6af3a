use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Store port cannot be 0")]
    InvalidPort,

    #[error("Store host cannot be empty")]
    EmptyHost,
}

/// Connection settings for the ordered key-value store.
///
/// Read once at startup. `VALKEY_*` environment variables override the
/// file-provided values; there is no hot reload.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bound on establishing the connection, in seconds.
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,
    /// Bound on any single store command, in seconds.
    #[serde(default = "default_timeout")]
    pub operation_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: default_host(),
            port: default_port(),
            connect_timeout_secs: default_timeout(),
            operation_timeout_secs: default_timeout(),
        }
    }
}

impl StoreConfig {
    /// Apply `VALKEY_HOST`, `VALKEY_PORT`, `VALKEY_CONNECT_TIMEOUT_SECS`
    /// and `VALKEY_OPERATION_TIMEOUT_SECS` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_lookup(|name| std::env::var(name).ok());
    }

    /// Same as [`StoreConfig::apply_env`] with an injected lookup, so
    /// override behavior is testable without mutating the process
    /// environment.
    pub fn apply_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("VALKEY_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("VALKEY_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring unparseable VALKEY_PORT"),
            }
        }
        if let Some(secs) = lookup("VALKEY_CONNECT_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.connect_timeout_secs = secs,
                Err(_) => {
                    tracing::warn!(value = %secs, "ignoring unparseable VALKEY_CONNECT_TIMEOUT_SECS")
                }
            }
        }
        if let Some(secs) = lookup("VALKEY_OPERATION_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.operation_timeout_secs = secs,
                Err(_) => {
                    tracing::warn!(value = %secs, "ignoring unparseable VALKEY_OPERATION_TIMEOUT_SECS")
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }
}
