//! Price-oracle collaborator.
//!
//! `add_margin` requires a fresh oracle price, so its transaction starts from
//! whatever update commands the oracle needs and passes the feed's shared
//! object to the entry function. The update mechanism itself lives behind
//! [`PriceOracle`]; the SDK only owns the invocation point.

use crate::chain::types::ProgrammableTransaction;
use crate::error::ChainError;
use crate::network::{PythNetwork, TESTNET_FEED_OBJECTS};
use async_trait::async_trait;

#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Begin a transaction with any commands needed to refresh `feed_id`.
    async fn begin_update(&self, feed_id: &str) -> Result<ProgrammableTransaction, ChainError>;

    /// The shared object id of the price feed for `symbol`.
    async fn feed_object_id(&self, symbol: &str, feed_id: &str) -> Result<String, ChainError>;
}

/// Resolves feed objects from the static per-network table and emits no
/// update commands. Sufficient on testnet, where feeds are pushed by keepers;
/// mainnet integrators plug a full Pyth updater behind [`PriceOracle`].
pub struct StaticFeedOracle {
    network: PythNetwork,
}

impl StaticFeedOracle {
    pub fn new(network: PythNetwork) -> Self {
        Self { network }
    }
}

#[async_trait]
impl PriceOracle for StaticFeedOracle {
    async fn begin_update(&self, _feed_id: &str) -> Result<ProgrammableTransaction, ChainError> {
        Ok(ProgrammableTransaction::new())
    }

    async fn feed_object_id(&self, symbol: &str, _feed_id: &str) -> Result<String, ChainError> {
        match self.network {
            PythNetwork::Testnet => TESTNET_FEED_OBJECTS
                .get(symbol)
                .map(|id| id.to_string())
                .ok_or_else(|| {
                    ChainError::Rpc(format!("no price feed object for symbol {symbol}"))
                }),
            PythNetwork::Mainnet => Err(ChainError::Rpc(
                "mainnet feed objects require a Pyth-backed PriceOracle".to_string(),
            )),
        }
    }
}
