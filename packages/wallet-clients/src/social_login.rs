use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError, RwLock,
};

use async_trait::async_trait;
use log::{debug, error, info};
use smart_wallet_utils::{
    chain::parse_chain_id_hex,
    error::{WalletError, WalletResult},
    sdk::SocialLoginSdk,
};
use tokio::task::JoinHandle;

use crate::{
    evm::base_client::EvmBaseClient,
    provider::{EvmProvider, LoginCredentials},
};

/// login provider backed by locally held key material.
///
/// connecting derives the owner key and checks the rpc endpoint serves the
/// expected chain, in a background task. the provider shows up once both succeed.
pub struct LocalSocialLogin {
    rpc_url: String,
    credentials: LoginCredentials,
    chain_id: RwLock<Option<u64>>,
    provider: Arc<RwLock<Option<EvmProvider>>>,
    connecting: Mutex<Option<JoinHandle<()>>>,
    wallet_visible: AtomicBool,
}

impl LocalSocialLogin {
    pub fn new(rpc_url: &str, credentials: LoginCredentials) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            credentials,
            chain_id: RwLock::new(None),
            provider: Arc::new(RwLock::new(None)),
            connecting: Mutex::new(None),
            wallet_visible: AtomicBool::new(false),
        }
    }

    pub fn is_wallet_visible(&self) -> bool {
        self.wallet_visible.load(Ordering::SeqCst)
    }

    fn expected_chain_id(&self) -> Option<u64> {
        *self.chain_id.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort_connect(&self) {
        let mut connecting = self.connecting.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = connecting.take() {
            task.abort();
        }
    }
}

async fn connect(
    rpc_url: String,
    credentials: LoginCredentials,
    expected_chain_id: u64,
) -> WalletResult<EvmProvider> {
    let provider = EvmProvider::new(&rpc_url, &credentials)?;

    let chain_id = provider.chain_id().await?;
    if chain_id != expected_chain_id {
        return Err(WalletError::UnsupportedNetwork(chain_id));
    }

    Ok(provider)
}

#[async_trait]
impl SocialLoginSdk for LocalSocialLogin {
    type Provider = EvmProvider;

    async fn init(&self, chain_id_hex: &str) -> WalletResult<()> {
        let chain_id = parse_chain_id_hex(chain_id_hex)?;
        *self.chain_id.write().unwrap_or_else(PoisonError::into_inner) = Some(chain_id);
        debug!("login provider initialized for chain {chain_id}");
        Ok(())
    }

    fn show_connect_modal(&self) {
        let Some(expected_chain_id) = self.expected_chain_id() else {
            error!("login provider used before init");
            return;
        };

        let mut connecting = self.connecting.lock().unwrap_or_else(PoisonError::into_inner);
        if connecting.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let rpc_url = self.rpc_url.clone();
        let credentials = self.credentials.clone();
        let slot = self.provider.clone();

        *connecting = Some(tokio::spawn(async move {
            match connect(rpc_url, credentials, expected_chain_id).await {
                Ok(provider) => {
                    info!("wallet connected: {}", provider.owner());
                    *slot.write().unwrap_or_else(PoisonError::into_inner) = Some(provider);
                }
                Err(e) => error!("wallet connection failed: {e}"),
            }
        }));
    }

    fn show_wallet(&self) {
        self.wallet_visible.store(true, Ordering::SeqCst);
    }

    fn hide_wallet(&self) {
        self.wallet_visible.store(false, Ordering::SeqCst);
    }

    fn provider(&self) -> Option<EvmProvider> {
        self.provider
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn logout(&self) -> WalletResult<()> {
        self.abort_connect();
        self.provider
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        info!("wallet logged out");
        Ok(())
    }
}
