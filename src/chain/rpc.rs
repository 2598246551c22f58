//! Fullnode JSON-RPC collaborator.
//!
//! The on-chain layer talks to Sui through the [`ChainRpc`] trait so tests
//! (and embedders with their own node plumbing) can substitute the transport.
//! [`JsonRpcChain`] is the production implementation.

use crate::chain::types::{ObjectDigest, ObjectId, ObjectRef};
use crate::error::ChainError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// One owned coin as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinRecord {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
    pub balance: u128,
}

impl CoinRecord {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            object_id: self.object_id,
            version: self.version,
            digest: self.digest.clone(),
        }
    }
}

/// Resolution result for a shared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedObjectInfo {
    pub object_id: ObjectId,
    pub initial_shared_version: u64,
}

/// Execution result of a submitted transaction block.
#[derive(Debug, Clone)]
pub struct TransactionResponse {
    pub digest: String,
    /// `"success"` or `"failure"` when effects were requested.
    pub status: Option<String>,
    /// Full node response for callers that need more.
    pub raw: Value,
}

impl TransactionResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() != Some("failure")
    }
}

/// Chain access as the SDK needs it. Object-safe; kept minimal on purpose.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Resolve a shared object's initial shared version.
    async fn get_shared_object(&self, object_id: &str) -> Result<SharedObjectInfo, ChainError>;

    /// Resolve an owned object's current `(id, version, digest)`.
    async fn get_object_ref(&self, object_id: &str) -> Result<ObjectRef, ChainError>;

    /// All coins of `coin_type` owned by `owner`, in node listing order.
    async fn get_coins(&self, owner: &str, coin_type: &str)
        -> Result<Vec<CoinRecord>, ChainError>;

    async fn reference_gas_price(&self) -> Result<u64, ChainError>;

    /// Submit signed transaction bytes and wait for execution.
    async fn execute_transaction(
        &self,
        tx_bytes_b64: &str,
        signatures_b64: &[String],
    ) -> Result<TransactionResponse, ChainError>;
}

// ─── JSON-RPC implementation ─────────────────────────────────────────────────

pub struct JsonRpcChain {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcChain {
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            url: url.to_string(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        #[derive(Deserialize)]
        struct RpcError {
            code: i64,
            message: String,
        }

        #[derive(Deserialize)]
        struct RpcResponse<T> {
            result: Option<T>,
            error: Option<RpcError>,
        }

        let body = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(format!("{method}: {e}")))?;
        let parsed: RpcResponse<T> = resp
            .json()
            .await
            .map_err(|e| ChainError::Rpc(format!("{method}: bad response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(ChainError::Rpc(format!(
                "{method}: {} (code {})",
                err.message, err.code
            )));
        }
        parsed
            .result
            .ok_or_else(|| ChainError::Rpc(format!("{method}: empty result")))
    }
}

// Wire shapes for the subset of the node API we consume.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectDataWire {
    object_id: String,
    version: String,
    digest: String,
    owner: Option<OwnerWire>,
}

#[derive(Deserialize)]
enum OwnerWire {
    #[serde(rename = "Shared")]
    Shared {
        initial_shared_version: u64,
    },
    #[serde(rename = "AddressOwner")]
    AddressOwner(String),
    #[serde(rename = "ObjectOwner")]
    ObjectOwner(String),
    #[serde(rename = "Immutable")]
    Immutable,
}

#[derive(Deserialize)]
struct ObjectResponseWire {
    data: Option<ObjectDataWire>,
    error: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinWire {
    coin_object_id: String,
    version: String,
    digest: String,
    balance: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinPageWire {
    data: Vec<CoinWire>,
    has_next_page: bool,
    next_cursor: Option<String>,
}

fn parse_u64(s: &str, what: &str) -> Result<u64, ChainError> {
    s.parse()
        .map_err(|_| ChainError::Rpc(format!("bad {what}: {s}")))
}

impl ObjectDataWire {
    fn object_ref(&self) -> Result<ObjectRef, ChainError> {
        Ok(ObjectRef {
            object_id: ObjectId::from_hex(&self.object_id)?,
            version: parse_u64(&self.version, "version")?,
            digest: ObjectDigest::from_base58(&self.digest)?,
        })
    }
}

#[async_trait]
impl ChainRpc for JsonRpcChain {
    async fn get_shared_object(&self, object_id: &str) -> Result<SharedObjectInfo, ChainError> {
        let resp: ObjectResponseWire = self
            .call("sui_getObject", json!([object_id, { "showOwner": true }]))
            .await?;
        let data = match (resp.data, resp.error) {
            (Some(data), _) => data,
            (None, err) => {
                return Err(ChainError::Rpc(format!(
                    "object {object_id} not found: {err:?}"
                )))
            }
        };
        match data.owner {
            Some(OwnerWire::Shared {
                initial_shared_version,
            }) => Ok(SharedObjectInfo {
                object_id: ObjectId::from_hex(&data.object_id)?,
                initial_shared_version,
            }),
            other => Err(ChainError::Rpc(format!(
                "object {object_id} is not shared: {}",
                match other {
                    None => "owner unknown",
                    Some(_) => "owned or immutable",
                }
            ))),
        }
    }

    async fn get_object_ref(&self, object_id: &str) -> Result<ObjectRef, ChainError> {
        let resp: ObjectResponseWire = self
            .call("sui_getObject", json!([object_id, { "showOwner": true }]))
            .await?;
        resp.data
            .ok_or_else(|| ChainError::Rpc(format!("object {object_id} not found")))?
            .object_ref()
    }

    async fn get_coins(
        &self,
        owner: &str,
        coin_type: &str,
    ) -> Result<Vec<CoinRecord>, ChainError> {
        let mut coins = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page: CoinPageWire = self
                .call("suix_getCoins", json!([owner, coin_type, cursor, null]))
                .await?;
            for coin in page.data {
                coins.push(CoinRecord {
                    object_id: ObjectId::from_hex(&coin.coin_object_id)?,
                    version: parse_u64(&coin.version, "coin version")?,
                    digest: ObjectDigest::from_base58(&coin.digest)?,
                    balance: coin
                        .balance
                        .parse()
                        .map_err(|_| ChainError::Rpc(format!("bad balance: {}", coin.balance)))?,
                });
            }
            if !page.has_next_page {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }
        Ok(coins)
    }

    async fn reference_gas_price(&self) -> Result<u64, ChainError> {
        let price: String = self.call("suix_getReferenceGasPrice", json!([])).await?;
        parse_u64(&price, "gas price")
    }

    async fn execute_transaction(
        &self,
        tx_bytes_b64: &str,
        signatures_b64: &[String],
    ) -> Result<TransactionResponse, ChainError> {
        let raw: Value = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    tx_bytes_b64,
                    signatures_b64,
                    { "showEffects": true },
                    "WaitForLocalExecution",
                ]),
            )
            .await?;

        let digest = raw
            .get("digest")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let status = raw
            .pointer("/effects/status/status")
            .and_then(Value::as_str)
            .map(str::to_string);
        if status.as_deref() == Some("failure") {
            let error = raw
                .pointer("/effects/status/error")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            tracing::warn!(digest = %digest, error, "transaction executed with failure status");
        }
        Ok(TransactionResponse {
            digest,
            status,
            raw,
        })
    }
}
