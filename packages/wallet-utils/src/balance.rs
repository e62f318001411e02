use std::fmt;

use alloy::primitives::{utils::format_units, Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::WalletResult;

/// one token held by a smart account, as reported by the balance backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub contract_name: String,
    pub contract_ticker_symbol: String,
    pub contract_decimals: u8,
    pub contract_address: Address,
    #[serde(with = "u256_decimal")]
    pub balance: U256,
}

impl BalanceEntry {
    /// human readable balance using the token's decimal precision
    pub fn formatted(&self) -> WalletResult<String> {
        let raw = format_units(self.balance, self.contract_decimals)?;
        Ok(trim_fraction(raw))
    }
}

impl fmt::Display for BalanceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self
            .formatted()
            .unwrap_or_else(|_| self.balance.to_string());
        write!(
            f,
            "{} - {} - {}",
            self.contract_name, self.contract_ticker_symbol, amount
        )
    }
}

// keeps at least one fractional digit: "1.500000" -> "1.5", "2.000" -> "2.0"
fn trim_fraction(raw: String) -> String {
    if !raw.contains('.') {
        return raw;
    }
    let trimmed = raw.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// query parameters shared by the itemized and the usd balance queries.
/// an empty `token_addresses` filter means every known holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesParams {
    pub chain_id: u64,
    pub eoa_address: Address,
    pub token_addresses: Vec<Address>,
}

impl BalancesParams {
    pub fn all_holdings(chain_id: u64, eoa_address: Address) -> Self {
        Self {
            chain_id,
            eoa_address,
            token_addresses: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalancesResponse {
    pub data: Vec<BalanceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsdBalanceResponse {
    pub data: UsdBalance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdBalance {
    pub total_balance: f64,
}

/// raw balances travel as base-10 strings
mod u256_decimal {
    use std::str::FromStr;

    use alloy::primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_str(&raw).map_err(D::Error::custom)
    }
}
