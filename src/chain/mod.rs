//! On-chain interaction: transaction types, keys, RPC, caches, and the
//! move-call assembler for the perp protocol's entry functions.

pub mod client;
pub mod coins;
pub mod crypto;
pub mod oracle;
pub mod rpc;
pub mod shared_object;
pub mod types;

pub use client::ChainOps;
pub use crypto::{SignatureScheme, SuiKeyPair};
pub use oracle::{PriceOracle, StaticFeedOracle};
pub use rpc::{ChainRpc, CoinRecord, JsonRpcChain, SharedObjectInfo, TransactionResponse};
pub use shared_object::SharedObjectCache;
pub use types::{GasBudget, ProgrammableTransaction, TransactionData};

use crate::error::ChainError;
use async_trait::async_trait;

/// External wallet hook for the off-sign flow: the SDK assembles and encodes
/// the transaction, the wallet returns a serialized signature
/// (`base64(flag || sig || pubkey)`), the SDK submits.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn sign_transaction(&self, sender: &str, tx_bytes: &[u8])
        -> Result<String, ChainError>;
}

/// Entry functions of the perp package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PerpFunction {
    SetSubAccount,
    Deposit,
    Withdraw,
    AddMargin,
}

impl PerpFunction {
    pub(crate) fn module(&self) -> &'static str {
        match self {
            Self::SetSubAccount => "sub_accounts",
            Self::Deposit | Self::Withdraw => "bank",
            Self::AddMargin => "perpetual",
        }
    }

    pub(crate) fn function(&self) -> &'static str {
        match self {
            Self::SetSubAccount => "set_sub_account",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::AddMargin => "add_margin",
        }
    }
}
