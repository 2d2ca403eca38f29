use crate::constants::{DEFAULT_LISTEN_ADDR, DEFAULT_NODE_CONFIG, DEFAULT_PORT};
use crate::events::model::LogLevel;
use crate::node::types::{KeyError, SecretKey};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid signing_key: {0}")]
    SigningKey(#[from] KeyError),
}

/// Console server configuration (TOML).
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// INI file holding the node's `[p2p]` section, read on `p2p.update`.
    #[serde(default = "default_node_config")]
    pub node_config: String,
    /// Hex encoded 32-byte key used to sign miner transactions.
    pub signing_key: Option<String>,
    pub app_name: Option<String>,
    /// Logging / events configuration
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Path to JSON line audit log (rotated). If unset, defaults to logs/console_audit.jsonl
    pub json_path: Option<String>,
    /// Max size in bytes before rotation (default 5MB)
    pub json_max_bytes: Option<usize>,
    /// Number of rotated files to retain (default 3)
    pub json_rotate: Option<u32>,
    /// Disable console sink (default false)
    pub disable_console: Option<bool>,
    /// Minimum level printed by the console sink (default info)
    pub console_level: Option<LogLevel>,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_node_config() -> String {
    DEFAULT_NODE_CONFIG.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            node_config: default_node_config(),
            signing_key: None,
            app_name: None,
            logging: None,
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str::<ConsoleConfig>(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }

    /// Decode the configured signing key. Absent key means a freshly
    /// generated ephemeral one (devnet use only).
    pub fn signing_key(&self) -> Result<Option<SecretKey>, ConfigError> {
        match &self.signing_key {
            Some(hex_key) => SecretKey::from_hex(hex_key)
                .map(Some)
                .map_err(ConfigError::SigningKey),
            None => Ok(None),
        }
    }
}
