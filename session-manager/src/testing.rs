//! In-memory doubles of the login provider and the smart-account sdk.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use smart_wallet_utils::{
    balance::{BalanceEntry, BalancesParams, BalancesResponse, UsdBalance, UsdBalanceResponse},
    chain::NetworkConfig,
    error::{WalletError, WalletResult},
    fee_quote::{FeeQuote, RefundTransaction},
    sdk::{SmartAccountFactory, SmartAccountSdk, SocialLoginSdk, Web3Provider},
    tokens::token_by_symbol,
    transfer::TransferCall,
};

pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const SMART_ACCOUNT: Address = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");
pub const REFUND_RECEIVER: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProvider {
    pub owner: Address,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self { owner: OWNER }
    }
}

/// shared, observable state behind every `MockSocialLogin` built from it.
#[derive(Debug, Default)]
pub struct MockLoginState {
    // provider shows up on this poll once a connection was requested; 0 means already connected
    connect_after: Option<usize>,
    connect_requested: AtomicBool,
    connected: AtomicBool,
    polls: AtomicUsize,
    pub instances: AtomicUsize,
    pub init_calls: Mutex<Vec<String>>,
    pub show_connect_calls: AtomicUsize,
    pub show_wallet_calls: AtomicUsize,
    pub hide_wallet_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl MockLoginState {
    pub fn connects_after(polls: usize) -> Arc<Self> {
        Arc::new(Self {
            connect_after: Some(polls),
            ..Default::default()
        })
    }

    pub fn already_connected() -> Arc<Self> {
        let state = Self {
            connect_after: Some(0),
            ..Default::default()
        };
        state.connected.store(true, Ordering::SeqCst);
        Arc::new(state)
    }

    pub fn never_connects() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn provider_polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub struct MockSocialLogin {
    state: Arc<MockLoginState>,
}

impl MockSocialLogin {
    pub fn new(state: Arc<MockLoginState>) -> Self {
        state.instances.fetch_add(1, Ordering::SeqCst);
        Self { state }
    }
}

#[async_trait]
impl SocialLoginSdk for MockSocialLogin {
    type Provider = MockProvider;

    async fn init(&self, chain_id_hex: &str) -> WalletResult<()> {
        self.state
            .init_calls
            .lock()
            .unwrap()
            .push(chain_id_hex.to_string());
        Ok(())
    }

    fn show_connect_modal(&self) {
        self.state.show_connect_calls.fetch_add(1, Ordering::SeqCst);
        self.state.connect_requested.store(true, Ordering::SeqCst);
    }

    fn show_wallet(&self) {
        self.state.show_wallet_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn hide_wallet(&self) {
        self.state.hide_wallet_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn provider(&self) -> Option<MockProvider> {
        let polls = self.state.polls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.state.connected.load(Ordering::SeqCst) {
            return Some(MockProvider::default());
        }

        let requested = self.state.connect_requested.load(Ordering::SeqCst);
        match self.state.connect_after {
            Some(after) if requested && polls >= after => {
                self.state.connected.store(true, Ordering::SeqCst);
                Some(MockProvider::default())
            }
            _ => None,
        }
    }

    async fn logout(&self) -> WalletResult<()> {
        self.state.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.state.connected.store(false, Ordering::SeqCst);
        self.state.connect_requested.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// scripted responses and a call log shared by the factory and its accounts.
#[derive(Debug, Default)]
pub struct MockAccountState {
    pub fail_init: AtomicBool,
    pub balances: Mutex<Vec<BalanceEntry>>,
    pub usd_total: Mutex<f64>,
    pub quotes: Mutex<Vec<FeeQuote>>,
    pub fail_send: AtomicBool,
    pub calls: Mutex<Vec<&'static str>>,
    pub networks: Mutex<Vec<NetworkConfig>>,
    pub prepared: Mutex<Vec<TransferCall>>,
    pub sent: Mutex<Vec<(RefundTransaction, u64)>>,
}

impl MockAccountState {
    pub fn new(balances: Vec<BalanceEntry>, quotes: Vec<FeeQuote>) -> Arc<Self> {
        Arc::new(Self {
            balances: Mutex::new(balances),
            quotes: Mutex::new(quotes),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Debug, Clone)]
pub struct MockAccountFactory {
    pub state: Arc<MockAccountState>,
}

#[async_trait]
impl SmartAccountFactory<MockProvider> for MockAccountFactory {
    type Account = MockSmartAccount;

    async fn create(
        &self,
        web3_provider: Web3Provider<MockProvider>,
        network: NetworkConfig,
    ) -> WalletResult<MockSmartAccount> {
        self.state.record("create");
        self.state.networks.lock().unwrap().push(network);

        Ok(MockSmartAccount {
            owner: web3_provider.provider().owner,
            initialized: false,
            state: self.state.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockSmartAccount {
    pub owner: Address,
    pub initialized: bool,
    state: Arc<MockAccountState>,
}

#[async_trait]
impl SmartAccountSdk for MockSmartAccount {
    async fn init(&mut self) -> WalletResult<()> {
        self.state.record("init");
        if self.state.fail_init.load(Ordering::SeqCst) {
            return Err(WalletError::ClientError("smart account init failed".to_string()));
        }
        self.initialized = true;
        Ok(())
    }

    fn address(&self) -> Address {
        SMART_ACCOUNT
    }

    async fn get_all_token_balances(
        &self,
        params: &BalancesParams,
    ) -> WalletResult<BalancesResponse> {
        self.state.record("get_all_token_balances");
        assert!(params.token_addresses.is_empty());

        Ok(BalancesResponse {
            data: self.state.balances.lock().unwrap().clone(),
        })
    }

    async fn get_total_balance_in_usd(
        &self,
        _params: &BalancesParams,
    ) -> WalletResult<UsdBalanceResponse> {
        self.state.record("get_total_balance_in_usd");

        Ok(UsdBalanceResponse {
            data: UsdBalance {
                total_balance: *self.state.usd_total.lock().unwrap(),
            },
        })
    }

    async fn prepare_refund_transaction(
        &self,
        transaction: &TransferCall,
    ) -> WalletResult<Vec<FeeQuote>> {
        self.state.record("prepare_refund_transaction");
        self.state.prepared.lock().unwrap().push(transaction.clone());

        Ok(self.state.quotes.lock().unwrap().clone())
    }

    async fn create_refund_transaction(
        &self,
        transaction: &TransferCall,
        fee_quote: &FeeQuote,
    ) -> WalletResult<RefundTransaction> {
        self.state.record("create_refund_transaction");

        Ok(RefundTransaction::new(
            SMART_ACCOUNT,
            transaction,
            fee_quote.clone(),
        ))
    }

    async fn send_transaction(
        &self,
        transaction: RefundTransaction,
        gas_limit: u64,
    ) -> WalletResult<TxHash> {
        self.state.record("send_transaction");
        if self.state.fail_send.load(Ordering::SeqCst) {
            return Err(WalletError::TransactionError("relay rejected".to_string()));
        }

        self.state.sent.lock().unwrap().push((transaction, gas_limit));
        Ok(TxHash::repeat_byte(0xab))
    }
}

pub fn balance_entry(symbol: &str, balance: u64) -> BalanceEntry {
    let token = token_by_symbol(symbol).unwrap_or_else(|| panic!("unknown token {symbol}"));

    BalanceEntry {
        contract_name: format!("{symbol} token"),
        contract_ticker_symbol: symbol.to_string(),
        contract_decimals: token.decimals,
        contract_address: token.address,
        balance: U256::from(balance),
    }
}

pub fn fee_quote(symbol: &str, payment: u64) -> FeeQuote {
    let token = token_by_symbol(symbol).unwrap_or_else(|| panic!("unknown token {symbol}"));

    FeeQuote {
        symbol: symbol.to_string(),
        token_address: token.address,
        decimal: token.decimals,
        payment: U256::from(payment),
        token_gas_price: U256::from(1u64),
        offset: U256::from(1u64),
        refund_receiver: REFUND_RECEIVER,
    }
}
