//! CLI configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use pos_commerce::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PosConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub sale: SaleConfig,
}

impl PosConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Currency prices and sales are expressed in.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.sale.currency)
            .ok_or_else(|| anyhow!("Unsupported currency in config: {}", self.sale.currency))
    }
}

/// Where the session is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Session store file, relative to the working directory.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Simulated login latency in milliseconds.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".pos").join("session.json")
}

fn default_login_delay_ms() -> u64 {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            login_delay_ms: default_login_delay_ms(),
        }
    }
}

/// Dataset location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Directory of JSON datasets replacing the built-in catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "MXN".to_string()
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Generate a default pos.toml config file.
pub fn generate_default_config() -> String {
    r#"# Point of sale configuration

[session]
store_path = ".pos/session.json"
login_delay_ms = 1000

[data]
# Directory holding products.json, customers.json, suppliers.json,
# invoices.json, audit.json and users.json. The built-in catalog is used
# for any file that is missing.
# dir = "data"

[log]
level = "info"

[sale]
currency = "MXN"
"#
    .to_string()
}
