//! High-level client — `PerpClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`; on-chain
//! operations live under `chain::client`. This module keeps the builder,
//! shared cache state, and accessor methods.

use crate::auth::client::Auth;
use crate::chain::client::ChainOps;
use crate::chain::oracle::{PriceOracle, StaticFeedOracle};
use crate::chain::rpc::{ChainRpc, JsonRpcChain};
use crate::chain::shared_object::SharedObjectCache;
use crate::domain::account::client::Account;
use crate::domain::market::client::Markets;
use crate::domain::trade::client::Trade;
use crate::error::SdkError;
use crate::http::PerpHttp;
use crate::network::{PerpConfig, PerpNetwork};

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// The primary entry point for the SDK.
///
/// Holds no key material: signing methods take keys or a wallet explicitly,
/// and `auth()` installs bearer sessions on the HTTP layer.
pub struct PerpClient {
    pub(crate) config: PerpConfig,
    pub(crate) http: PerpHttp,
    pub(crate) rpc: Arc<dyn ChainRpc>,
    pub(crate) oracle: Arc<dyn PriceOracle>,
    pub(crate) shared_objects: Arc<SharedObjectCache>,
    /// Symbol → perp id, filled by the market metadata cache.
    pub(crate) perp_ids: Arc<RwLock<HashMap<String, String>>>,
    /// Symbol → Pyth feed id, filled alongside `perp_ids`.
    pub(crate) feed_ids: Arc<RwLock<HashMap<String, String>>>,
}

impl PerpClient {
    /// Client for a stock deployment.
    pub fn new(network: PerpNetwork) -> Self {
        // The default builder cannot fail.
        match Self::builder().network(network).build() {
            Ok(client) => client,
            Err(_) => unreachable!("default build is infallible"),
        }
    }

    pub fn builder() -> PerpClientBuilder {
        PerpClientBuilder::default()
    }

    pub fn config(&self) -> &PerpConfig {
        &self.config
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn trade(&self) -> Trade<'_> {
        Trade { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn chain(&self) -> ChainOps<'_> {
        ChainOps { client: self }
    }

    /// Drop cached market metadata and shared-object resolutions.
    pub async fn clear_caches(&self) {
        self.perp_ids.write().await.clear();
        self.feed_ids.write().await.clear();
    }
}

impl Clone for PerpClient {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            http: self.http.clone(),
            rpc: self.rpc.clone(),
            oracle: self.oracle.clone(),
            shared_objects: self.shared_objects.clone(),
            perp_ids: self.perp_ids.clone(),
            feed_ids: self.feed_ids.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PerpClientBuilder {
    network: PerpNetwork,
    endpoint: Option<String>,
    rpc_url: Option<String>,
    rpc: Option<Arc<dyn ChainRpc>>,
    oracle: Option<Arc<dyn PriceOracle>>,
}

impl Default for PerpClientBuilder {
    fn default() -> Self {
        Self {
            network: PerpNetwork::Testnet,
            endpoint: None,
            rpc_url: None,
            rpc: None,
            oracle: None,
        }
    }
}

impl PerpClientBuilder {
    pub fn network(mut self, network: PerpNetwork) -> Self {
        self.network = network;
        self
    }

    /// Override the REST endpoint (tests, private gateways).
    pub fn endpoint(mut self, url: &str) -> Self {
        self.endpoint = Some(url.to_string());
        self
    }

    /// Override the fullnode URL while keeping the JSON-RPC transport.
    pub fn rpc_url(mut self, url: &str) -> Self {
        self.rpc_url = Some(url.to_string());
        self
    }

    /// Substitute the chain transport entirely.
    pub fn rpc(mut self, rpc: Arc<dyn ChainRpc>) -> Self {
        self.rpc = Some(rpc);
        self
    }

    /// Substitute the price-oracle collaborator (e.g. a full Pyth updater).
    pub fn oracle(mut self, oracle: Arc<dyn PriceOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn build(self) -> Result<PerpClient, SdkError> {
        let config = self.network.config().clone();
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| config.perp_endpoint.to_string());
        let rpc = match self.rpc {
            Some(rpc) => rpc,
            None => {
                let url = self.rpc_url.unwrap_or_else(|| config.sui_rpc.to_string());
                Arc::new(JsonRpcChain::new(&url))
            }
        };
        let oracle = self
            .oracle
            .unwrap_or_else(|| Arc::new(StaticFeedOracle::new(config.pyth_network)));

        Ok(PerpClient {
            config,
            http: PerpHttp::new(&endpoint),
            rpc,
            oracle,
            shared_objects: Arc::new(SharedObjectCache::new()),
            perp_ids: Arc::new(RwLock::new(HashMap::new())),
            feed_ids: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}
