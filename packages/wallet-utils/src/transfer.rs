use std::str::FromStr;

use alloy::{
    network::TransactionBuilder,
    primitives::{
        utils::parse_units,
        Address, Bytes, U256,
    },
    rpc::types::TransactionRequest,
    sol,
    sol_types::SolCall,
};

use crate::{
    error::{WalletError, WalletResult},
    tokens::TokenDescriptor,
};

sol! {
    /// the only erc20 function a transfer needs
    interface IERC20Transfer {
        function transfer(address _to, uint256 _value);
    }
}

/// transaction the user asked for, before any fee reimbursement is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferCall {
    /// plain value transfer of the native asset
    Native { to: Address, value: U256 },
    /// `transfer(recipient, amount)` call against a token contract
    Erc20 { token: Address, data: Bytes },
}

impl TransferCall {
    /// builds the call for sending `amount` of `token` to `recipient`.
    /// amounts are decimal strings in whole-token units.
    pub fn build(recipient: &str, amount: &str, token: &TokenDescriptor) -> WalletResult<Self> {
        let to = Address::from_str(recipient.trim())?;

        let value = parse_amount(amount, token.decimals)?;

        if token.is_native() {
            return Ok(TransferCall::Native { to, value });
        }

        Ok(TransferCall::Erc20 {
            token: token.address,
            data: encode_erc20_transfer(to, value),
        })
    }

    pub fn target(&self) -> Address {
        match self {
            TransferCall::Native { to, .. } => *to,
            TransferCall::Erc20 { token, .. } => *token,
        }
    }

    pub fn value(&self) -> U256 {
        match self {
            TransferCall::Native { value, .. } => *value,
            TransferCall::Erc20 { .. } => U256::ZERO,
        }
    }

    pub fn data(&self) -> Option<&Bytes> {
        match self {
            TransferCall::Native { .. } => None,
            TransferCall::Erc20 { data, .. } => Some(data),
        }
    }

    pub fn into_transaction_request(self) -> TransactionRequest {
        match self {
            TransferCall::Native { to, value } => {
                TransactionRequest::default().with_to(to).with_value(value)
            }
            TransferCall::Erc20 { token, data } => {
                TransactionRequest::default().with_to(token).with_input(data)
            }
        }
    }
}

/// parses a whole-token decimal amount into base units; negative amounts are rejected
fn parse_amount(amount: &str, decimals: u8) -> WalletResult<U256> {
    let parsed = parse_units(amount.trim(), decimals)?;
    if parsed.is_negative() {
        return Err(WalletError::ParseError(format!(
            "amount must not be negative: {amount}"
        )));
    }

    Ok(parsed.get_absolute())
}

pub fn encode_erc20_transfer(to: Address, value: U256) -> Bytes {
    IERC20Transfer::transferCall {
        _to: to,
        _value: value,
    }
    .abi_encode()
    .into()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::tokens::{token_by_symbol, TOKENS};

    const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    #[test]
    fn native_token_is_a_plain_value_transfer() {
        let matic = token_by_symbol("MATIC").unwrap();
        let call = TransferCall::build(RECIPIENT, "1.5", &matic).unwrap();

        assert_eq!(
            call,
            TransferCall::Native {
                to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
                value: U256::from(1_500_000_000_000_000_000u128),
            }
        );
        assert!(call.data().is_none());
    }

    #[test]
    fn every_other_token_is_a_contract_call() {
        for token in TOKENS.iter().filter(|t| !t.is_native()) {
            let call = TransferCall::build(RECIPIENT, "2", token).unwrap();

            assert_eq!(call.target(), token.address);
            assert_eq!(call.value(), U256::ZERO);

            let data = call.data().expect("erc20 transfer carries calldata");
            assert_eq!(&data[..4], IERC20Transfer::transferCall::SELECTOR.as_slice());

            let decoded = IERC20Transfer::transferCall::abi_decode(data, true).unwrap();
            assert_eq!(decoded._to, Address::from_str(RECIPIENT).unwrap());
            assert_eq!(
                decoded._value,
                U256::from(2u64) * U256::from(10u64).pow(U256::from(token.decimals))
            );
        }
    }

    #[test]
    fn transfer_selector_matches_erc20() {
        // keccak("transfer(address,uint256)")[..4]
        assert_eq!(
            IERC20Transfer::transferCall::SELECTOR,
            [0xa9, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn unparseable_inputs_are_errors() {
        let usdc = token_by_symbol("USDC").unwrap();

        assert!(matches!(
            TransferCall::build("not-an-address", "1", &usdc),
            Err(WalletError::ParseError(_))
        ));
        assert!(matches!(
            TransferCall::build(RECIPIENT, "one", &usdc),
            Err(WalletError::ParseError(_))
        ));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let usdc = token_by_symbol("USDC").unwrap();
        let matic = token_by_symbol("MATIC").unwrap();

        assert!(matches!(
            TransferCall::build(RECIPIENT, "-5", &usdc),
            Err(WalletError::ParseError(_))
        ));
        assert!(matches!(
            TransferCall::build(RECIPIENT, "-5", &matic),
            Err(WalletError::ParseError(_))
        ));
        assert!(matches!(
            TransferCall::build(RECIPIENT, " -0.25", &matic),
            Err(WalletError::ParseError(_))
        ));
    }

    #[test]
    fn request_carries_target_value_and_input() {
        let usdc = token_by_symbol("USDC").unwrap();
        let call = TransferCall::build(RECIPIENT, "3", &usdc).unwrap();
        let data = call.data().cloned().unwrap();

        let request = call.into_transaction_request();
        assert_eq!(request.to, Some(usdc.address.into()));
        assert_eq!(request.input.input(), Some(&data));
    }
}
