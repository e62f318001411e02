use alloy::{
    contract::{CallBuilder, CallDecoder},
    network::{Network, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::Transport,
};
use async_trait::async_trait;
use log::debug;
use smart_wallet_utils::error::WalletError;

use super::request_provider_client::RequestProviderClient;

pub trait EvmQueryRequest: Clone {
    /// decoded output type for this query
    type Output;

    /// every query request must be convertible to a transaction request
    fn get_tx_request(&self) -> TransactionRequest;

    /// decode the raw bytes of the EVM call into the output type
    fn decode_response(&self, bytes: Bytes) -> Result<Self::Output, WalletError>;
}

impl<T, P, D, N> EvmQueryRequest for CallBuilder<T, P, D, N>
where
    T: Transport + Clone + Send + Sync,
    P: Provider<T, N> + Send + Sync,
    D: CallDecoder,
    D::CallOutput: Send + Sync,
    N::TransactionRequest: Into<TransactionRequest>,
    N: Network,
    CallBuilder<T, P, D, N>: Clone,
{
    type Output = D::CallOutput;

    fn get_tx_request(&self) -> TransactionRequest {
        self.clone().into_transaction_request().into()
    }

    fn decode_response(&self, raw: Bytes) -> Result<Self::Output, WalletError> {
        let resp = self.decode_output(raw, true)?;
        Ok(resp)
    }
}

/// base client trait with default implementations for evm based clients.
#[async_trait]
pub trait EvmBaseClient: RequestProviderClient {
    async fn chain_id(&self) -> Result<u64, WalletError> {
        let client = self.get_request_provider().await?;

        let chain_id = client.get_chain_id().await?;

        Ok(chain_id)
    }

    async fn query_balance(&self, address: Address) -> Result<U256, WalletError> {
        let client = self.get_request_provider().await?;

        let balance = client.get_balance(address).await?;

        Ok(balance)
    }

    async fn has_code(&self, address: Address) -> Result<bool, WalletError> {
        let client = self.get_request_provider().await?;

        let code = client.get_code_at(address).await?;

        Ok(!code.is_empty())
    }

    async fn gas_price(&self) -> Result<u128, WalletError> {
        let client = self.get_request_provider().await?;

        let gas_price = client.get_gas_price().await?;

        Ok(gas_price)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, WalletError> {
        let client = self.get_request_provider().await?;

        let gas = client.estimate_gas(tx).await?;
        debug!("estimated {gas} gas");

        Ok(gas)
    }

    /// signs and broadcasts `tx` from the signer, returning as soon as the node accepts it
    async fn send_tx(&self, tx: TransactionRequest) -> Result<TxHash, WalletError> {
        let client = self.get_request_provider().await?;

        let signed_tx = tx.with_from(self.signer_address());

        let pending = client.send_transaction(signed_tx).await?;

        Ok(*pending.tx_hash())
    }

    async fn query<Q: EvmQueryRequest + Send>(
        &self,
        builder: Q,
    ) -> Result<Q::Output, WalletError> {
        let client = self.get_request_provider().await?;

        let tx_request: TransactionRequest = builder.get_tx_request();

        let raw_response = client.call(&tx_request).await?;

        let decoded = builder.decode_response(raw_response)?;

        Ok(decoded)
    }
}
