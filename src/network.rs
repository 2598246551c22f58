//! Per-network configuration tables.
//!
//! Everything the SDK needs to talk to one deployment of the exchange:
//! fullnode RPC URL, REST endpoint, the package id of the perp protocol, the
//! shared objects its entry functions take, and the margin coin type.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// The on-chain clock, a well-known Sui system object.
pub const SUI_CLOCK_OBJECT_ID: &str = "0x6";

/// Coin type used for gas payment.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Network selection for the exchange deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerpNetwork {
    Mainnet,
    Testnet,
}

impl PerpNetwork {
    pub fn config(&self) -> &'static PerpConfig {
        match self {
            Self::Mainnet => &MAINNET_CONFIG,
            Self::Testnet => &TESTNET_CONFIG,
        }
    }
}

/// Static configuration for one deployment.
#[derive(Debug, Clone)]
pub struct PerpConfig {
    /// Sui fullnode JSON-RPC URL.
    pub sui_rpc: &'static str,
    /// Exchange REST endpoint (no trailing slash).
    pub perp_endpoint: &'static str,
    /// Package id of the perp protocol.
    pub package_id: &'static str,
    /// Shared object: global protocol configuration (read-only in calls).
    pub protocol_config: &'static str,
    /// Shared object: sub-account registry.
    pub sub_accounts: &'static str,
    /// Shared object: transaction indexer.
    pub tx_indexer: &'static str,
    /// Shared object: the margin bank.
    pub bank: &'static str,
    /// Margin coin type (`package::module::Struct`).
    pub coin_type: &'static str,
    /// Which Pyth deployment serves price feeds for this network.
    pub pyth_network: PythNetwork,
}

/// Pyth deployment selector for the oracle collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PythNetwork {
    Mainnet,
    Testnet,
}

pub static MAINNET_CONFIG: PerpConfig = PerpConfig {
    sui_rpc: "https://fullnode.mainnet.sui.io:443",
    perp_endpoint: "https://gray-api.dipcoin.io/api",
    package_id: "0x978fed071cca22dd26bec3cf4a5d5a00ab10f39cb8c659bbfdfbec4397241001",
    protocol_config: "0xdeff2ed27dfe5402e38d60b090a7dcf9b4842c16ec63e472119272173603dfd8",
    sub_accounts: "0x3ad8c911dff3ee0aeeaf86f0c7e7a540a23743477e831d14f62b63e58fb8eb0d",
    tx_indexer: "0x5dd7fa4c14b88167458df2ea281f4253213137ef4cd91d9b83fb56d0494f6741",
    bank: "0x9f2d3e6c1b08a5d47e21c9f0b83a6d5e4c7b2a190f8e6d3c5a4b7e9d1c0f2a38",
    coin_type: "0xdba34672e30cb065b1f93e3ab55318768fd6fef66c15942c9f7cb846e2f900e7::usdc::USDC",
    pyth_network: PythNetwork::Mainnet,
};

pub static TESTNET_CONFIG: PerpConfig = PerpConfig {
    sui_rpc: "https://fullnode.testnet.sui.io:443",
    perp_endpoint: "https://demoapi.dipcoin.io/exchange/api",
    package_id: "0x0114b1d4656ac42a9523da1c7241f0291918f9517fd30f3e6e84b9fd5b3e3730",
    protocol_config: "0x05a630c36e8a6cb9ff99e2d2595e55ec70d002a8069a90c2d1bac0bfa12271fa",
    sub_accounts: "0x62a28e07b1e3ddb2cb1108349761ec1cf096b0c3523863af3bfd4e36e14beb5b",
    tx_indexer: "0xaed1352c3f6f2a44fd521350f53a98f675d4b07cc36916607eae24c2650a9cb9",
    bank: "0x4c9a1b7e3d5f28c60b9e4a2d7c1f8b5a3e6d09c24f7b1a8e5d3c6b90f2e7a415",
    coin_type: "0x219d80b1be5d586ff3bdbfeaf4d051ec721442c3a6498a3222773c6945a639d1::usdc::USDC",
    pyth_network: PythNetwork::Testnet,
};

lazy_static! {
    /// Pyth price-feed objects on testnet, keyed by market symbol.
    ///
    /// On mainnet feed objects are resolved dynamically through the oracle
    /// collaborator; testnet ships a fixed set.
    pub static ref TESTNET_FEED_OBJECTS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert(
            "ETH-PERP",
            "0x362f009be96a1d74ff76156cec96876b89aa09529c1261d491751903ee798e4d",
        );
        m.insert(
            "BTC-PERP",
            "0x8c65003d5d1a529adc4be78cfceb3855ef529d9807fcd58b06caab0a96caa806",
        );
        m.insert(
            "SUI-PERP",
            "0x1e9be81a16c22896f2b4852e8b5c5e59d247c5566dee7b390477f4b7f70914df",
        );
        m
    };
}
