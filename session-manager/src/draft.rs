use smart_wallet_utils::{
    balance::BalanceEntry,
    tokens::{default_token, TokenDescriptor},
};

/// transfer form inputs. kept verbatim: recipient and amount are only parsed when sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    pub recipient: String,
    pub amount: String,
    pub token: TokenDescriptor,
    pub gas_token: Option<BalanceEntry>,
}

impl Default for TransferDraft {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            amount: String::new(),
            token: default_token(),
            gas_token: None,
        }
    }
}

impl TransferDraft {
    pub fn gas_ticker(&self) -> Option<&str> {
        self.gas_token
            .as_ref()
            .map(|entry| entry.contract_ticker_symbol.as_str())
    }
}
