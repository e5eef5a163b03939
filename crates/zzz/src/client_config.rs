//! Client configuration
//!
//! Defaults for CLI commands, stored at `{home}/config/client.toml`. Every
//! value can be overridden by the matching command-line flag.
//!
//! # Example client.toml
//!
//! ```toml
//! # Chain ID of the network commitments are signed for
//! chain-id = 1
//!
//! # Address of the ZigZagZog contract
//! zzz-address = "0x0000000000000000000000000000000000000000"
//!
//! # Keystore used by `zzz sig sign` when --keyfile is not given
//! keyfile = ""
//!
//! # CLI output format (text|json)
//! output = "text"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zzz_crypto::{DEFAULT_CHAIN_ID, DEFAULT_VERIFYING_CONTRACT};

/// Default client configuration filename.
pub const CLIENT_CONFIG_FILENAME: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Chain ID of the network.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// ZigZagZog contract address.
    #[serde(default = "default_zzz_address")]
    pub zzz_address: String,

    /// Default keystore path for signing.
    ///
    /// Empty means `--keyfile` is required.
    #[serde(default)]
    pub keyfile: String,

    /// CLI output format (text|json).
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_zzz_address() -> String {
    DEFAULT_VERIFYING_CONTRACT.to_string()
}

fn default_output() -> String {
    "text".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            zzz_address: default_zzz_address(),
            keyfile: String::new(),
            output: default_output(),
        }
    }
}

impl ClientConfig {
    /// Get the path to the client config file.
    pub fn config_path(home: &Path) -> PathBuf {
        home.join("config").join(CLIENT_CONFIG_FILENAME)
    }

    /// Load client configuration from file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = Self::config_path(home);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read client config: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse client config: {}", config_path.display()))
    }

    /// Save client configuration to file.
    pub fn save(&self, home: &Path) -> Result<()> {
        let config_path = Self::config_path(home);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize client config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write client config: {}", config_path.display()))?;

        Ok(())
    }

    /// Resolve the keystore path: flag first, then config.
    pub fn effective_keyfile(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| {
            if self.keyfile.is_empty() {
                None
            } else {
                Some(PathBuf::from(&self.keyfile))
            }
        })
    }

    /// Resolve the output format: flag first, then config.
    pub fn effective_output<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        match flag {
            Some(output) => output,
            None if self.output.is_empty() => "text",
            None => &self.output,
        }
    }
}
