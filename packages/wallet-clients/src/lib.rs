pub mod contracts;
pub mod evm;
pub mod fees;
pub mod provider;
pub mod smart_account;
pub mod social_login;
