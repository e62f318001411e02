pub mod balance;
pub mod chain;
pub mod error;
pub mod fee_quote;
pub mod sdk;
pub mod tokens;
pub mod transfer;

pub use error::{WalletError, WalletResult};
