use smart_wallet_utils::WalletError;
use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("No fee quote matches gas token: {0}")]
    NoMatchingFeeQuote(String),

    #[error("Token index {0} is not in the catalog")]
    InvalidTokenIndex(usize),

    #[error("Wallet provider not ready after {0} attempts")]
    ProviderNotReady(u32),
}
