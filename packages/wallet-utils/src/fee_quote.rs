use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::{
    tokens::NATIVE_SYMBOL,
    transfer::{encode_erc20_transfer, TransferCall},
};

/// gas limit attached to every refund transaction submission (0x1E8480)
pub const DEFAULT_GAS_LIMIT: u64 = 2_000_000;

/// relay offer to front the network fee of a transaction, reimbursed in `symbol`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub symbol: String,
    #[serde(rename = "address")]
    pub token_address: Address,
    pub decimal: u8,
    pub payment: U256,
    pub token_gas_price: U256,
    pub offset: U256,
    pub refund_receiver: Address,
}

impl FeeQuote {
    /// the call that pays `payment` to the refund receiver
    pub fn reimbursement_call(&self) -> BatchCall {
        if self.symbol == NATIVE_SYMBOL {
            BatchCall {
                to: self.refund_receiver,
                value: self.payment,
                data: Bytes::new(),
            }
        } else {
            BatchCall {
                to: self.token_address,
                value: U256::ZERO,
                data: encode_erc20_transfer(self.refund_receiver, self.payment),
            }
        }
    }
}

/// first quote whose symbol is exactly `ticker`
pub fn find_fee_quote<'a>(quotes: &'a [FeeQuote], ticker: &str) -> Option<&'a FeeQuote> {
    quotes.iter().find(|quote| quote.symbol == ticker)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl From<&TransferCall> for BatchCall {
    fn from(call: &TransferCall) -> Self {
        BatchCall {
            to: call.target(),
            value: call.value(),
            data: call.data().cloned().unwrap_or_default(),
        }
    }
}

/// user call bundled with the reimbursement of the quoted fee, executed by the smart account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundTransaction {
    pub account: Address,
    pub calls: Vec<BatchCall>,
    pub fee_quote: FeeQuote,
}

impl RefundTransaction {
    pub fn new(account: Address, transaction: &TransferCall, fee_quote: FeeQuote) -> Self {
        let calls = vec![BatchCall::from(transaction), fee_quote.reimbursement_call()];

        Self {
            account,
            calls,
            fee_quote,
        }
    }
}
