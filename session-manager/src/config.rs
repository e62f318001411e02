use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_wallet_utils::{chain::POLYGON_MAINNET, fee_quote::DEFAULT_GAS_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// the single chain the login provider and the smart account are scoped to
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// unbounded when unset
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: None,
            gas_limit: default_gas_limit(),
        }
    }
}

impl SessionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_chain_id() -> u64 {
    POLYGON_MAINNET
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}
