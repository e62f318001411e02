use std::{mem, sync::Arc};

use alloy::primitives::{Address, TxHash};
use log::{debug, error, info, warn};
use smart_wallet_utils::{
    balance::{BalanceEntry, BalancesParams},
    chain::{chain_id_hex, NetworkConfig},
    fee_quote::find_fee_quote,
    sdk::{SmartAccountFactory, SmartAccountSdk, SocialLoginSdk, Web3Provider},
    tokens::token_by_index,
    transfer::TransferCall,
};

use crate::{
    config::SessionConfig,
    draft::TransferDraft,
    error::{SessionError, SessionResult},
    readiness::{wait_for_provider, LoginCancelHandle, WaitOutcome},
    state::{ReadySession, SessionPhase, SessionState},
};

type SdkBuilder<S> = Box<dyn Fn() -> S + Send + Sync>;

/// wallet session for a single user: login, smart-account bootstrap,
/// balances and gas-abstracted transfers.
pub struct Session<S, F>
where
    S: SocialLoginSdk,
    F: SmartAccountFactory<S::Provider>,
{
    config: SessionConfig,
    sdk_builder: SdkBuilder<S>,
    // created on first login, dropped on logout
    sdk: Option<Arc<S>>,
    factory: F,
    state: SessionState<S::Provider, F::Account>,
    draft: TransferDraft,
    login_cancel: Option<LoginCancelHandle>,
}

impl<S, F> Session<S, F>
where
    S: SocialLoginSdk,
    F: SmartAccountFactory<S::Provider>,
{
    pub fn new(
        config: SessionConfig,
        sdk_builder: impl Fn() -> S + Send + Sync + 'static,
        factory: F,
    ) -> Self {
        Self {
            config,
            sdk_builder: Box::new(sdk_builder),
            sdk: None,
            factory,
            state: SessionState::LoggedOut,
            draft: TransferDraft::default(),
            login_cancel: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState<S::Provider, F::Account> {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn has_login_sdk(&self) -> bool {
        self.sdk.is_some()
    }

    pub fn account_address(&self) -> Option<Address> {
        self.state.account().map(|account| account.address())
    }

    pub fn balances(&self) -> &[BalanceEntry] {
        self.state.balances()
    }

    pub fn usd_balance(&self) -> Option<f64> {
        self.state.ready().and_then(|ready| ready.usd_balance)
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    /// handle that aborts the provider wait of the current (or next) login.
    pub fn login_cancel_handle(&mut self) -> LoginCancelHandle {
        self.login_cancel
            .get_or_insert_with(LoginCancelHandle::new)
            .clone()
    }

    /// connects the wallet provider, waiting for the user if needed, then bootstraps
    /// the smart account.
    pub async fn login(&mut self) -> SessionResult<()> {
        if self.state.has_account() {
            debug!("login: session already has a smart account");
            return Ok(());
        }

        let sdk = match &self.sdk {
            Some(sdk) => sdk.clone(),
            None => {
                let sdk = Arc::new((self.sdk_builder)());
                sdk.init(&chain_id_hex(self.config.chain_id))
                    .await
                    .inspect_err(|e| error!("error initializing login provider: {e}"))?;
                self.sdk = Some(sdk.clone());
                sdk
            }
        };

        if sdk.provider().is_some() {
            return self.setup_smart_account().await;
        }

        sdk.show_connect_modal();
        sdk.show_wallet();
        self.state = SessionState::Connecting;

        let cancel = self.login_cancel_handle();
        let outcome = wait_for_provider(
            sdk.as_ref(),
            self.config.poll_interval(),
            self.config.max_poll_attempts,
            &cancel,
        )
        .await;
        self.login_cancel = None;

        match outcome {
            WaitOutcome::Ready(provider) => {
                self.state = SessionState::Connected { provider };
                self.setup_smart_account().await
            }
            WaitOutcome::Cancelled => {
                info!("login cancelled before the wallet connected");
                self.state = SessionState::LoggedOut;
                Ok(())
            }
            WaitOutcome::Exhausted(attempts) => {
                warn!("wallet provider not ready after {attempts} attempts");
                self.state = SessionState::LoggedOut;
                Err(SessionError::ProviderNotReady(attempts))
            }
        }
    }

    /// builds and initializes the smart account for the connected provider, then
    /// fetches its balances. no-op without a provider or when an account already exists.
    pub async fn setup_smart_account(&mut self) -> SessionResult<()> {
        let Some(sdk) = self.sdk.clone() else {
            return Ok(());
        };
        let Some(provider) = sdk.provider() else {
            return Ok(());
        };
        if matches!(
            self.state,
            SessionState::Bootstrapping { .. }
                | SessionState::Ready(_)
                | SessionState::TransferPending(_)
        ) {
            return Ok(());
        }

        sdk.hide_wallet();
        self.state = SessionState::Bootstrapping {
            provider: provider.clone(),
        };

        let web3_provider = Web3Provider::new(provider.clone(), self.config.chain_id);

        match self.build_account(web3_provider).await {
            Ok(account) => {
                info!("smart account ready: {}", account.address());
                self.state = SessionState::Ready(ReadySession::new(provider, account));
                self.get_balance().await
            }
            Err(e) => {
                error!("error setting up smart account: {e}");
                self.state = SessionState::Connected { provider };
                Err(e)
            }
        }
    }

    async fn build_account(
        &self,
        web3_provider: Web3Provider<S::Provider>,
    ) -> SessionResult<F::Account> {
        let network = NetworkConfig::single(self.config.chain_id);
        network.validate()?;

        let mut account = self.factory.create(web3_provider, network).await?;
        account.init().await?;

        Ok(account)
    }

    /// replaces the balance listing and defaults the gas token to its first entry.
    pub async fn get_balance(&mut self) -> SessionResult<()> {
        let chain_id = self.config.chain_id;
        let SessionState::Ready(ready) = &mut self.state else {
            return Ok(());
        };

        let params = BalancesParams::all_holdings(chain_id, ready.account.address());

        let balances = ready
            .account
            .get_all_token_balances(&params)
            .await
            .inspect_err(|e| error!("error fetching token balances: {e}"))?;
        debug!("token balances: {:?}", balances.data);

        let usd_balance = ready
            .account
            .get_total_balance_in_usd(&params)
            .await
            .inspect_err(|e| error!("error fetching usd balance: {e}"))?;
        debug!("usd balance: {}", usd_balance.data.total_balance);

        ready.balances = balances.data;
        ready.usd_balance = Some(usd_balance.data.total_balance);
        self.draft.gas_token = ready.balances.first().cloned();

        Ok(())
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.draft.recipient = recipient.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.draft.amount = amount.into();
    }

    /// picks the token to send from the catalog
    pub fn select_token(&mut self, index: usize) -> SessionResult<()> {
        self.draft.token = token_by_index(index).ok_or(SessionError::InvalidTokenIndex(index))?;
        Ok(())
    }

    /// picks the gas token from the fetched balances; an unknown index clears it
    pub fn select_gas_token(&mut self, index: usize) {
        self.draft.gas_token = self.state.balances().get(index).cloned();
    }

    /// relays the drafted transfer, paying gas in the selected gas token.
    ///
    /// returns `Ok(None)` without touching the sdk when there is no smart account
    /// or no gas token selected.
    pub async fn send_tokens(&mut self) -> SessionResult<Option<TxHash>> {
        let Some(gas_ticker) = self.draft.gas_ticker().map(str::to_string) else {
            debug!("send skipped: no gas token selected");
            return Ok(None);
        };

        let ready = match mem::take(&mut self.state) {
            SessionState::Ready(ready) => ready,
            other => {
                debug!("send skipped: session is {}", other.phase());
                self.state = other;
                return Ok(None);
            }
        };
        self.state = SessionState::TransferPending(ready);

        let result = match &self.state {
            SessionState::TransferPending(pending) => {
                relay_transfer(&pending.account, &self.draft, &gas_ticker, self.config.gas_limit)
                    .await
            }
            _ => Ok(None),
        };

        if let SessionState::TransferPending(ready) = mem::take(&mut self.state) {
            self.state = SessionState::Ready(ready);
        }

        match result {
            Ok(tx_hash) => Ok(tx_hash),
            Err(e) => {
                error!("error sending transaction: {e}");
                Err(e)
            }
        }
    }

    /// logs the provider out and drops the session. without a login provider this
    /// only logs an error.
    pub async fn logout(&mut self) -> SessionResult<()> {
        let Some(sdk) = self.sdk.take() else {
            error!("login provider not initialized");
            return Ok(());
        };

        if let Some(cancel) = self.login_cancel.take() {
            cancel.cancel();
        }

        let result = sdk.logout().await;
        sdk.hide_wallet();
        self.state = SessionState::LoggedOut;

        result.map_err(|e| {
            error!("error logging out: {e}");
            e.into()
        })
    }
}

async fn relay_transfer<A: SmartAccountSdk>(
    account: &A,
    draft: &TransferDraft,
    gas_ticker: &str,
    gas_limit: u64,
) -> SessionResult<Option<TxHash>> {
    let transaction = TransferCall::build(&draft.recipient, &draft.amount, &draft.token)?;

    let fee_quotes = account.prepare_refund_transaction(&transaction).await?;
    debug!("fee quotes: {fee_quotes:?}");

    let Some(fee_quote) = find_fee_quote(&fee_quotes, gas_ticker) else {
        return Err(SessionError::NoMatchingFeeQuote(gas_ticker.to_string()));
    };

    let refund_transaction = account
        .create_refund_transaction(&transaction, fee_quote)
        .await?;

    let tx_hash = account
        .send_transaction(refund_transaction, gas_limit)
        .await?;
    info!("transaction sent: {tx_hash}");

    Ok(Some(tx_hash))
}
