use std::num::ParseIntError;

use alloy::{
    contract::Error as ContractError,
    hex::FromHexError,
    primitives::{utils::UnitsError, Address},
    providers::PendingTransactionError,
    transports::{RpcError, TransportErrorKind},
};

pub type WalletResult<T> = Result<T, WalletError>;

/// error type returned by every sdk implementation.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("client error: {0}")]
    ClientError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("transaction error: {0}")]
    TransactionError(String),
    #[error("wallet provider is not connected")]
    NotConnected,
    #[error("smart account is not initialized")]
    AccountNotInitialized,
    #[error("smart account {0} is not deployed")]
    AccountNotDeployed(Address),
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(u64),
}

impl From<ContractError> for WalletError {
    fn from(value: ContractError) -> Self {
        WalletError::QueryError(value.to_string())
    }
}

impl From<PendingTransactionError> for WalletError {
    fn from(value: PendingTransactionError) -> Self {
        WalletError::TransactionError(value.to_string())
    }
}

impl From<RpcError<TransportErrorKind>> for WalletError {
    fn from(value: RpcError<TransportErrorKind>) -> Self {
        WalletError::QueryError(value.to_string())
    }
}

impl From<FromHexError> for WalletError {
    fn from(value: FromHexError) -> Self {
        WalletError::ParseError(value.to_string())
    }
}

impl From<UnitsError> for WalletError {
    fn from(value: UnitsError) -> Self {
        WalletError::ParseError(value.to_string())
    }
}

impl From<ParseIntError> for WalletError {
    fn from(value: ParseIntError) -> Self {
        WalletError::ParseError(value.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(value: serde_json::Error) -> Self {
        WalletError::ParseError(value.to_string())
    }
}
