use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

pub const POLYGON_MAINNET: u64 = 137;

/// minimal `0x`-prefixed hex form of a chain id, as expected by the login provider
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

pub fn parse_chain_id_hex(value: &str) -> WalletResult<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| WalletError::ParseError(format!("chain id is not hex: {value}")))?;

    Ok(u64::from_str_radix(digits, 16)?)
}

/// network scope handed to a smart account on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub active_network_id: u64,
    pub supported_network_ids: Vec<u64>,
}

impl NetworkConfig {
    /// account scoped to exactly one chain
    pub fn single(chain_id: u64) -> Self {
        Self {
            active_network_id: chain_id,
            supported_network_ids: vec![chain_id],
        }
    }

    pub fn validate(&self) -> WalletResult<()> {
        if !self
            .supported_network_ids
            .contains(&self.active_network_id)
        {
            return Err(WalletError::UnsupportedNetwork(self.active_network_id));
        }
        Ok(())
    }
}
