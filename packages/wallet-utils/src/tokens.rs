use alloy::primitives::{address, Address};

/// symbol of the chain's native asset; transfers of it carry value instead of calldata
pub const NATIVE_SYMBOL: &str = "MATIC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub address: Address,
    pub decimals: u8,
    pub symbol: &'static str,
}

impl TokenDescriptor {
    pub fn is_native(&self) -> bool {
        self.symbol == NATIVE_SYMBOL
    }
}

/// tokens known on polygon mainnet, in display order
pub const TOKENS: [TokenDescriptor; 5] = [
    TokenDescriptor {
        address: address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
        decimals: 6,
        symbol: "USDC",
    },
    TokenDescriptor {
        address: address!("c2132d05d31c914a87c6611c10748aeb04b58e8f"),
        decimals: 6,
        symbol: "USDT",
    },
    TokenDescriptor {
        address: address!("0000000000000000000000000000000000001010"),
        decimals: 18,
        symbol: "MATIC",
    },
    TokenDescriptor {
        address: address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"),
        decimals: 18,
        symbol: "DAI",
    },
    TokenDescriptor {
        address: address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"),
        decimals: 18,
        symbol: "WETH",
    },
];

pub fn default_token() -> TokenDescriptor {
    TOKENS[0]
}

pub fn token_by_index(index: usize) -> Option<TokenDescriptor> {
    TOKENS.get(index).copied()
}

pub fn token_by_symbol(symbol: &str) -> Option<TokenDescriptor> {
    TOKENS.iter().find(|token| token.symbol == symbol).copied()
}

pub fn token_by_address(token_address: Address) -> Option<TokenDescriptor> {
    TOKENS
        .iter()
        .find(|token| token.address == token_address)
        .copied()
}
