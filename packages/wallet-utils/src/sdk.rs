//! Seams to the external collaborators the wallet session drives: the
//! social-login provider that yields a connected wallet, and the smart-account
//! sdk that quotes, bundles and relays gas-abstracted transactions.

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::{
    balance::{BalancesParams, BalancesResponse, UsdBalanceResponse},
    chain::NetworkConfig,
    error::WalletResult,
    fee_quote::{FeeQuote, RefundTransaction},
    transfer::TransferCall,
};

/// wallet connection handed out by a social-login provider, paired with the
/// chain it is expected to operate on.
#[derive(Debug, Clone)]
pub struct Web3Provider<P> {
    provider: P,
    chain_id: u64,
}

impl<P> Web3Provider<P> {
    pub fn new(provider: P, chain_id: u64) -> Self {
        Self { provider, chain_id }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn into_inner(self) -> P {
        self.provider
    }
}

/// social-login wallet provider.
///
/// `show_connect_modal` only starts the connection; callers learn that it
/// finished by observing `provider()` becoming `Some`.
#[async_trait]
pub trait SocialLoginSdk: Send + Sync {
    type Provider: Clone + Send + Sync + 'static;

    async fn init(&self, chain_id_hex: &str) -> WalletResult<()>;

    fn show_connect_modal(&self);

    fn show_wallet(&self);

    fn hide_wallet(&self);

    fn provider(&self) -> Option<Self::Provider>;

    async fn logout(&self) -> WalletResult<()>;
}

/// smart-contract account operated through a relay service.
#[async_trait]
pub trait SmartAccountSdk: Send + Sync {
    async fn init(&mut self) -> WalletResult<()>;

    fn address(&self) -> Address;

    async fn get_all_token_balances(
        &self,
        params: &BalancesParams,
    ) -> WalletResult<BalancesResponse>;

    async fn get_total_balance_in_usd(
        &self,
        params: &BalancesParams,
    ) -> WalletResult<UsdBalanceResponse>;

    /// fee quotes for relaying `transaction`, one per accepted reimbursement token
    async fn prepare_refund_transaction(
        &self,
        transaction: &TransferCall,
    ) -> WalletResult<Vec<FeeQuote>>;

    async fn create_refund_transaction(
        &self,
        transaction: &TransferCall,
        fee_quote: &FeeQuote,
    ) -> WalletResult<RefundTransaction>;

    async fn send_transaction(
        &self,
        transaction: RefundTransaction,
        gas_limit: u64,
    ) -> WalletResult<TxHash>;
}

/// constructs (but does not initialize) smart accounts on top of a connected provider.
#[async_trait]
pub trait SmartAccountFactory<P: Send + 'static>: Send + Sync {
    type Account: SmartAccountSdk;

    async fn create(
        &self,
        web3_provider: Web3Provider<P>,
        network: NetworkConfig,
    ) -> WalletResult<Self::Account>;
}
