use std::{fmt, str::FromStr};

use alloy::primitives::Address;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smart_wallet_utils::error::{WalletError, WalletResult};

use crate::evm::{base_client::EvmBaseClient, request_provider_client::RequestProviderClient};

/// key material the local login provider derives its wallet from.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginCredentials {
    Mnemonic {
        phrase: String,
        #[serde(default)]
        index: u32,
    },
    PrivateKey(String),
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginCredentials::Mnemonic { index, .. } => f
                .debug_struct("Mnemonic")
                .field("index", index)
                .finish_non_exhaustive(),
            LoginCredentials::PrivateKey(_) => f.write_str("PrivateKey(..)"),
        }
    }
}

impl LoginCredentials {
    pub fn signer(&self) -> WalletResult<PrivateKeySigner> {
        let signer = match self {
            LoginCredentials::Mnemonic { phrase, index } => MnemonicBuilder::<English>::default()
                .phrase(phrase.as_str())
                .index(*index)
                .and_then(|builder| builder.build()),
            LoginCredentials::PrivateKey(key) => PrivateKeySigner::from_str(key),
        };

        signer.map_err(|e| WalletError::ClientError(e.to_string()))
    }
}

/// connected wallet: an rpc endpoint plus the key that signs for its owner.
#[derive(Clone)]
pub struct EvmProvider {
    pub rpc_url: String,
    pub signer: PrivateKeySigner,
}

impl fmt::Debug for EvmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmProvider")
            .field("rpc_url", &self.rpc_url)
            .field("owner", &self.signer.address())
            .finish()
    }
}

impl EvmProvider {
    pub fn new(rpc_url: &str, credentials: &LoginCredentials) -> WalletResult<Self> {
        Ok(Self {
            rpc_url: rpc_url.to_string(),
            signer: credentials.signer()?,
        })
    }

    pub fn owner(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl EvmBaseClient for EvmProvider {}

#[async_trait]
impl RequestProviderClient for EvmProvider {
    fn rpc_url(&self) -> String {
        self.rpc_url.clone()
    }

    fn signer(&self) -> PrivateKeySigner {
        self.signer.clone()
    }
}
