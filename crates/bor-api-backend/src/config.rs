//! # Backend Configuration
//!
//! Selects the backend variant and configures the chain database and the
//! state-sync channels handed to subscribers.

use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Which backend variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Consensus engine and chain database available.
    #[default]
    Full,
    /// Light chain only; no root hashes, no receipts.
    Light,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Light => write!(f, "light"),
        }
    }
}

impl FromStr for BackendMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "light" => Ok(Self::Light),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// Top-level backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend variant.
    pub mode: BackendMode,
    /// Chain database location.
    pub storage: StorageConfig,
    /// State-sync subscriber channels.
    pub bus: BusConfig,
}

/// Chain database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database directory.
    pub data_dir: PathBuf,
    /// Open without write access. Required when the node owns the database.
    pub read_only: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/chaindata"),
            read_only: true,
        }
    }
}

/// Subscriber channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Capacity of channels created by `Backend::subscribe_state_sync`.
    /// Events beyond it are dropped for the slow subscriber.
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl BackendConfig {
    /// Config for testing: full mode, writable scratch directory, small
    /// channels.
    pub fn for_testing() -> Self {
        Self {
            mode: BackendMode::Full,
            storage: StorageConfig {
                data_dir: env::temp_dir().join("bor-api-backend-test"),
                read_only: false,
            },
            bus: BusConfig {
                channel_capacity: 16,
            },
        }
    }

    /// Defaults overridden from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `BOR_BACKEND_MODE`: `full` or `light` (default: full)
    /// - `BOR_DATA_DIR`: chain database directory (default: ./data/chaindata)
    /// - `BOR_EVENT_CHANNEL_CAPACITY`: subscriber channel capacity (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides read through `lookup`, then validate.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("BOR_BACKEND_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(dir) = lookup("BOR_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(capacity) = lookup("BOR_EVENT_CHANNEL_CAPACITY") {
            self.bus.channel_capacity =
                capacity
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "BOR_EVENT_CHANNEL_CAPACITY",
                        value: capacity.clone(),
                    })?;
        }
        self.validate()
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.mode == BackendMode::Full && self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage.data_dir",
                value: String::new(),
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Unknown backend mode.
    #[error("invalid backend mode: {0} (expected full or light)")]
    InvalidMode(String),

    /// A value failed to parse or is out of range.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Subscriber channels need room for at least one event.
    #[error("bus.channel_capacity cannot be 0")]
    ZeroChannelCapacity,

    /// A collaborator the selected mode needs was not supplied.
    #[error("{mode} backend requires {component}")]
    MissingComponent {
        mode: BackendMode,
        component: &'static str,
    },
}
