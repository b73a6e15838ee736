//! Client configuration

use mcpi_core::{McpiError, Result};
use mcpi_wire::{DEFAULT_ADDRESS, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the server address
pub const ENV_ADDRESS: &str = "MCPI_ADDRESS";
/// Environment variable overriding the server port
pub const ENV_PORT: &str = "MCPI_PORT";
/// Environment variable naming the player to scope `player.*` calls to
pub const ENV_PLAYER: &str = "MCPI_PLAYER";

/// Configuration for a Pi API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server host name or IP
    pub address: String,
    /// Server port
    pub port: u16,
    /// Player name for `player.*` calls; the host player when unset
    pub player_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            player_name: None,
        }
    }
}

impl ClientConfig {
    /// Create config for a specific server
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            ..Default::default()
        }
    }

    /// Scope `player.*` calls to a named player
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Defaults overridden by `MCPI_ADDRESS`, `MCPI_PORT` and `MCPI_PLAYER`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `MCPI_*` keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(address) = lookup(ENV_ADDRESS) {
            config.address = address;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| McpiError::ConfigError(format!("{} is not a port: {:?}", ENV_PORT, port)))?;
        }
        if let Some(name) = lookup(ENV_PLAYER).filter(|n| !n.is_empty()) {
            config.player_name = Some(name);
        }

        Ok(config)
    }

    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| McpiError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}
