use std::collections::HashMap;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use smart_wallet_utils::{
    balance::{BalanceEntry, BalancesParams, BalancesResponse, UsdBalance, UsdBalanceResponse},
    chain::NetworkConfig,
    error::{WalletError, WalletResult},
    fee_quote::{FeeQuote, RefundTransaction},
    sdk::{SmartAccountFactory, SmartAccountSdk, Web3Provider},
    tokens::{token_by_address, TokenDescriptor, NATIVE_SYMBOL, TOKENS},
    transfer::TransferCall,
};

use crate::{
    contracts::{ISmartAccount, ISmartAccountFactory, IERC20},
    evm::{base_client::EvmBaseClient, request_provider_client::RequestProviderClient},
    fees::{convert_native_fee, PriceTable},
    provider::EvmProvider,
};

const NATIVE_NAME: &str = "Polygon Ecosystem Token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartAccountConfig {
    /// deployed account; when unset it is derived from `factory`
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub factory: Option<Address>,
    #[serde(default)]
    pub index: u64,
    /// receives the reimbursement of every relayed transaction
    pub refund_receiver: Address,
    /// gas added on top of the estimate for the batch execution itself
    #[serde(default = "default_fee_overhead_gas")]
    pub fee_overhead_gas: u64,
    #[serde(default)]
    pub usd_prices: HashMap<String, f64>,
}

fn default_fee_overhead_gas() -> u64 {
    50_000
}

/// builds `EvmSmartAccount`s on top of a connected `EvmProvider`.
#[derive(Debug, Clone)]
pub struct EvmSmartAccountFactory {
    pub config: SmartAccountConfig,
}

#[async_trait]
impl SmartAccountFactory<EvmProvider> for EvmSmartAccountFactory {
    type Account = EvmSmartAccount;

    async fn create(
        &self,
        web3_provider: Web3Provider<EvmProvider>,
        network: NetworkConfig,
    ) -> WalletResult<EvmSmartAccount> {
        network.validate()?;
        if web3_provider.chain_id() != network.active_network_id {
            return Err(WalletError::UnsupportedNetwork(web3_provider.chain_id()));
        }

        Ok(EvmSmartAccount {
            client: web3_provider.into_inner(),
            network,
            prices: PriceTable::new(self.config.usd_prices.clone()),
            config: self.config.clone(),
            address: None,
        })
    }
}

/// smart account executing batches on behalf of the connected owner.
pub struct EvmSmartAccount {
    client: EvmProvider,
    network: NetworkConfig,
    config: SmartAccountConfig,
    prices: PriceTable,
    address: Option<Address>,
}

impl EvmSmartAccount {
    fn account(&self) -> WalletResult<Address> {
        self.address.ok_or(WalletError::AccountNotInitialized)
    }

    /// batches sent to an address without code succeed and do nothing
    async fn deployed_account(&self) -> WalletResult<Address> {
        let account = self.account()?;
        if !self.client.has_code(account).await? {
            return Err(WalletError::AccountNotDeployed(account));
        }
        Ok(account)
    }

    async fn resolve_address(&self) -> WalletResult<Address> {
        if let Some(address) = self.config.address {
            return Ok(address);
        }

        let Some(factory) = self.config.factory else {
            return Err(WalletError::ClientError(
                "neither a smart account address nor a factory is configured".to_string(),
            ));
        };

        let rp = self.client.get_request_provider().await?;
        let factory = ISmartAccountFactory::new(factory, &rp);
        let response = self
            .client
            .query(factory.getAddressForCounterFactualAccount(
                self.client.owner(),
                U256::from(self.config.index),
            ))
            .await?;

        Ok(response._0)
    }

    async fn token_balance(&self, token: &TokenDescriptor, holder: Address) -> WalletResult<U256> {
        if token.is_native() {
            return self.client.query_balance(holder).await;
        }

        let rp = self.client.get_request_provider().await?;
        let erc20 = IERC20::new(token.address, &rp);
        let response = self.client.query(erc20.balanceOf(holder)).await?;

        Ok(response._0)
    }

    async fn token_name(&self, token: &TokenDescriptor) -> WalletResult<String> {
        if token.is_native() {
            return Ok(NATIVE_NAME.to_string());
        }

        let rp = self.client.get_request_provider().await?;
        let erc20 = IERC20::new(token.address, &rp);
        let response = self.client.query(erc20.name()).await?;

        Ok(response._0)
    }

    fn ensure_chain(&self, chain_id: u64) -> WalletResult<()> {
        if chain_id != self.network.active_network_id {
            return Err(WalletError::UnsupportedNetwork(chain_id));
        }
        Ok(())
    }
}

/// tokens a balance query covers; an empty filter means the whole catalog
fn tokens_for(filter: &[Address]) -> Vec<TokenDescriptor> {
    if filter.is_empty() {
        return TOKENS.to_vec();
    }

    filter
        .iter()
        .filter_map(|token_address| {
            let token = token_by_address(*token_address);
            if token.is_none() {
                debug!("skipping unknown token {token_address}");
            }
            token
        })
        .collect()
}

/// `executeBatch` calldata for the calls of a refund transaction
pub fn encode_execute_batch(transaction: &RefundTransaction) -> Bytes {
    let (dest, (value, func)): (Vec<Address>, (Vec<U256>, Vec<Bytes>)) = transaction
        .calls
        .iter()
        .map(|call| (call.to, (call.value, call.data.clone())))
        .unzip();

    ISmartAccount::executeBatchCall { dest, value, func }
        .abi_encode()
        .into()
}

#[async_trait]
impl SmartAccountSdk for EvmSmartAccount {
    async fn init(&mut self) -> WalletResult<()> {
        let chain_id = self.client.chain_id().await?;
        self.ensure_chain(chain_id)?;

        let address = self.resolve_address().await?;
        if !self.client.has_code(address).await? {
            warn!("smart account {address} has no code yet; transfers fail until it is deployed");
        }

        info!(
            "smart account {address} initialized for owner {}",
            self.client.owner()
        );
        self.address = Some(address);

        Ok(())
    }

    fn address(&self) -> Address {
        self.address.unwrap_or_default()
    }

    async fn get_all_token_balances(
        &self,
        params: &BalancesParams,
    ) -> WalletResult<BalancesResponse> {
        self.ensure_chain(params.chain_id)?;

        let mut data = vec![];
        for token in tokens_for(&params.token_addresses) {
            let balance = self.token_balance(&token, params.eoa_address).await?;
            if balance.is_zero() {
                continue;
            }

            data.push(BalanceEntry {
                contract_name: self.token_name(&token).await?,
                contract_ticker_symbol: token.symbol.to_string(),
                contract_decimals: token.decimals,
                contract_address: token.address,
                balance,
            });
        }

        Ok(BalancesResponse { data })
    }

    async fn get_total_balance_in_usd(
        &self,
        params: &BalancesParams,
    ) -> WalletResult<UsdBalanceResponse> {
        let balances = self.get_all_token_balances(params).await?;

        Ok(UsdBalanceResponse {
            data: UsdBalance {
                total_balance: self.prices.total(&balances.data)?,
            },
        })
    }

    async fn prepare_refund_transaction(
        &self,
        transaction: &TransferCall,
    ) -> WalletResult<Vec<FeeQuote>> {
        let account = self.deployed_account().await?;

        let request = transaction
            .clone()
            .into_transaction_request()
            .with_from(account);
        let gas = self.client.estimate_gas(&request).await? + self.config.fee_overhead_gas;
        let gas_price = self.client.gas_price().await?;
        let native_fee = U256::from(gas) * U256::from(gas_price);
        debug!("native fee: {native_fee} wei for {gas} gas");

        let Some(native_usd) = self.prices.usd(NATIVE_SYMBOL) else {
            return Err(WalletError::QueryError(format!(
                "no usd price for {NATIVE_SYMBOL}"
            )));
        };

        let quotes = TOKENS
            .iter()
            .filter_map(|token| {
                let token_usd = self.prices.usd(token.symbol)?;
                let payment = convert_native_fee(native_fee, native_usd, token_usd, token.decimals);

                Some(FeeQuote {
                    symbol: token.symbol.to_string(),
                    token_address: token.address,
                    decimal: token.decimals,
                    payment,
                    token_gas_price: payment / U256::from(gas.max(1)),
                    offset: U256::from(1u64),
                    refund_receiver: self.config.refund_receiver,
                })
            })
            .collect();

        Ok(quotes)
    }

    async fn create_refund_transaction(
        &self,
        transaction: &TransferCall,
        fee_quote: &FeeQuote,
    ) -> WalletResult<RefundTransaction> {
        let account = self.account()?;

        Ok(RefundTransaction::new(
            account,
            transaction,
            fee_quote.clone(),
        ))
    }

    async fn send_transaction(
        &self,
        transaction: RefundTransaction,
        gas_limit: u64,
    ) -> WalletResult<TxHash> {
        let account = self.deployed_account().await?;
        if transaction.account != account {
            return Err(WalletError::TransactionError(format!(
                "refund transaction built for {} not {account}",
                transaction.account
            )));
        }

        let request = TransactionRequest::default()
            .with_to(account)
            .with_input(encode_execute_batch(&transaction))
            .with_gas_limit(gas_limit);

        self.client.send_tx(request).await
    }
}
