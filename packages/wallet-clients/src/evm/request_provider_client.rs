use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    transports::http::{reqwest, Client, Http},
};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use smart_wallet_utils::error::WalletError;

/// recommended fillers plus a local wallet, so every request is signed client-side
pub type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Http<Client>>,
    Http<Client>,
    Ethereum,
>;

/// trait for evm-based clients to enable signing and request provider functionality.
/// each implementation must provide getters for the rpc url and signer which are used
/// to build the provider and sign transactions.
#[async_trait]
pub trait RequestProviderClient {
    fn rpc_url(&self) -> String;
    fn signer(&self) -> PrivateKeySigner;

    fn signer_address(&self) -> Address {
        self.signer().address()
    }

    async fn get_request_provider(&self) -> Result<SigningProvider, WalletError> {
        let url: reqwest::Url = self
            .rpc_url()
            .parse()
            .map_err(|_| WalletError::ParseError("failed to parse url".to_string()))?;

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(self.signer()))
            .on_http(url);

        Ok(provider)
    }
}
