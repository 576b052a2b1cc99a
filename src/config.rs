//! Controller configuration.
//!
//! Loaded from JSON or environment variables. Every field has a default, so an
//! empty object is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ledger::contract::DEFAULT_MODULE_NAME;
use crate::ledger::Contract;
use crate::state::session::DEFAULT_COUNTDOWN_TICKS;
use crate::state::TransactionRef;

/// Environment variable holding the contract address.
pub const ENV_MODULE_ADDRESS: &str = "CHARTPREDICT_MODULE_ADDRESS";

/// Environment variable holding the contract module name.
pub const ENV_MODULE_NAME: &str = "CHARTPREDICT_MODULE_NAME";

/// Environment variable holding the network name.
pub const ENV_NETWORK: &str = "CHARTPREDICT_NETWORK";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Contract address (normalized to `0x...`)
    pub module_address: String,

    /// Contract module name
    pub module_name: String,

    /// Network name, used in explorer links
    pub network: String,

    /// Countdown length in ticks
    pub countdown_ticks: u8,

    /// Countdown tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Delay before the balance refresh that follows a resolution
    pub resolution_refresh_delay_ms: u64,

    /// Delay before the balance refresh that follows a deposit
    pub deposit_refresh_delay_ms: u64,

    /// Explorer base URL for transaction links, e.g. `https://explorer.example/txn`
    pub explorer_url: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            module_address: "0x1".to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            network: "testnet".to_string(),
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            tick_interval_ms: 1000,
            resolution_refresh_delay_ms: 1000,
            deposit_refresh_delay_ms: 3000,
            explorer_url: None,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by any `CHARTPREDICT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(address) = lookup(ENV_MODULE_ADDRESS) {
            config.module_address = address;
        }
        if let Some(module) = lookup(ENV_MODULE_NAME) {
            config.module_name = module;
        }
        if let Some(network) = lookup(ENV_NETWORK) {
            config.network = network;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_address.trim().is_empty() {
            return Err(ConfigError::Invalid("module_address is empty".to_string()));
        }
        if self.module_name.trim().is_empty() {
            return Err(ConfigError::Invalid("module_name is empty".to_string()));
        }
        if self.countdown_ticks > 0 && self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive when counting down".to_string(),
            ));
        }
        Ok(())
    }

    pub fn contract(&self) -> Contract {
        Contract::new(&self.module_address, &self.module_name)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn resolution_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.resolution_refresh_delay_ms)
    }

    pub fn deposit_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.deposit_refresh_delay_ms)
    }

    /// Explorer link for a transaction, when an explorer is configured.
    pub fn transaction_url(&self, tx: &TransactionRef) -> Option<String> {
        self.explorer_url.as_ref().map(|base| {
            format!(
                "{}/{}?network={}",
                base.trim_end_matches('/'),
                tx,
                self.network
            )
        })
    }
}
