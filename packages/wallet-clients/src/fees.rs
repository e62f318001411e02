use std::collections::HashMap;

use alloy::primitives::{utils::format_units, U256};
use smart_wallet_utils::{
    balance::BalanceEntry,
    error::{WalletError, WalletResult},
};

// usd prices are fixed-point with 6 decimals
const PRICE_SCALE: f64 = 1_000_000.0;
const NATIVE_DECIMALS: u8 = 18;

/// usd price table keyed by ticker symbol.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        Self { prices }
    }

    pub fn usd(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied().filter(|price| *price > 0.0)
    }

    /// usd value of a single balance; unpriced tokens are worth nothing
    pub fn value_of(&self, entry: &BalanceEntry) -> WalletResult<f64> {
        let Some(price) = self.usd(&entry.contract_ticker_symbol) else {
            return Ok(0.0);
        };

        let amount: f64 = format_units(entry.balance, entry.contract_decimals)?
            .parse()
            .map_err(|_| WalletError::ParseError("balance is not a number".to_string()))?;

        Ok(amount * price)
    }

    pub fn total(&self, entries: &[BalanceEntry]) -> WalletResult<f64> {
        entries
            .iter()
            .try_fold(0.0, |total, entry| Ok(total + self.value_of(entry)?))
    }
}

/// converts a native-asset fee in wei into `token_decimals` units of a token, rounding up
pub fn convert_native_fee(
    native_fee: U256,
    native_usd: f64,
    token_usd: f64,
    token_decimals: u8,
) -> U256 {
    let native_price = U256::from((native_usd * PRICE_SCALE).round() as u128);
    let token_price = U256::from((token_usd * PRICE_SCALE).round() as u128);

    let numerator = native_fee * native_price * U256::from(10u64).pow(U256::from(token_decimals));
    let denominator = token_price * U256::from(10u64).pow(U256::from(NATIVE_DECIMALS));

    if denominator.is_zero() {
        return U256::ZERO;
    }

    numerator.div_ceil(denominator)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;

    use super::*;

    const ONE_NATIVE: u128 = 1_000_000_000_000_000_000;

    fn prices() -> PriceTable {
        PriceTable::new(HashMap::from([
            ("MATIC".to_string(), 0.5),
            ("USDC".to_string(), 1.0),
            ("WETH".to_string(), 2_000.0),
            ("DAI".to_string(), 0.0),
        ]))
    }

    fn entry(symbol: &str, decimals: u8, balance: u128) -> BalanceEntry {
        BalanceEntry {
            contract_name: symbol.to_string(),
            contract_ticker_symbol: symbol.to_string(),
            contract_decimals: decimals,
            contract_address: Address::ZERO,
            balance: U256::from(balance),
        }
    }

    #[test]
    fn native_fee_in_stablecoin() {
        let payment = convert_native_fee(U256::from(ONE_NATIVE), 0.5, 1.0, 6);
        assert_eq!(payment, U256::from(500_000u64));
    }

    #[test]
    fn native_fee_in_native_is_identity() {
        let fee = U256::from(123_456_789u64);
        assert_eq!(convert_native_fee(fee, 0.5, 0.5, 18), fee);
    }

    #[test]
    fn conversion_rounds_up() {
        // 1 wei at $0.5 is a fraction of the smallest usdc unit
        assert_eq!(
            convert_native_fee(U256::from(1u64), 0.5, 1.0, 6),
            U256::from(1u64)
        );
    }

    #[test]
    fn zero_token_price_yields_zero() {
        assert_eq!(
            convert_native_fee(U256::from(ONE_NATIVE), 0.5, 0.0, 6),
            U256::ZERO
        );
    }

    #[test]
    fn totals_skip_unpriced_tokens() {
        let table = prices();
        let entries = vec![
            entry("USDC", 6, 2_500_000),
            entry("WETH", 18, ONE_NATIVE / 2),
            entry("DAI", 18, ONE_NATIVE),
            entry("USDT", 6, 1_000_000),
        ];

        let total = table.total(&entries).unwrap();
        assert!((total - 1_002.5).abs() < 1e-9);
        assert_eq!(table.usd("DAI"), None);
    }
}
