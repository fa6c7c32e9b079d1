//! CLI configuration with TOML file support.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use splitter_tracker::TrackerConfig;
use splitter_types::NetworkId;
use splitter_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the splitter CLI.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; flags and
/// environment variables override individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Which network's deployments to use.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// JSON-RPC endpoint. Defaults to the network's public endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Account the node signs transactions with. Reads work without one.
    #[serde(default)]
    pub from: Option<Address>,

    /// Factory override, for forks and local deployments.
    #[serde(default)]
    pub factory: Option<Address>,

    /// Token override, for forks and local deployments.
    #[serde(default)]
    pub token: Option<Address>,

    /// Receipt poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// How long to wait for a transaction to be mined, in seconds.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::ArbitrumSepolia
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_confirmation_timeout_secs() -> u64 {
    120
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    pub fn factory_address(&self) -> Address {
        self.factory.unwrap_or_else(|| self.network.factory_address())
    }

    pub fn token_address(&self) -> Address {
        self.token.unwrap_or_else(|| self.network.token_address())
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig::new(
            Duration::from_millis(self.poll_interval_ms),
            Duration::from_secs(self.confirmation_timeout_secs),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: None,
            from: None,
            factory: None,
            token: None,
            poll_interval_ms: default_poll_interval_ms(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
