//! # Dipcoin Perp SDK
//!
//! A Rust SDK for the Dipcoin perpetuals exchange on Sui.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — shared newtypes, unit conversion, per-network config
//! 2. **Chain** — BCS transaction types, keys and intent signing, fullnode
//!    RPC, and the move-call assembler for deposit/withdraw/margin operations
//! 3. **Auth** — onboarding-message signing and dual-role bearer sessions
//! 4. **HTTP API** — `PerpHttp` with the response envelope and retry policies
//! 5. **High-Level Client** — `PerpClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dipcoin_perp_sdk::prelude::*;
//!
//! let client = PerpClient::new(PerpNetwork::Testnet);
//! let main_key = SuiKeyPair::from_hex("0x...")?;
//! client.auth().login(&main_key).await?;
//!
//! let ticker = client.markets().ticker("ETH-PERP").await?;
//! let positions = client.account().positions().await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, order enums, salt generation, unit conversion.
pub mod shared;

/// Domain modules (vertical slices): wire types and sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Per-network configuration tables.
pub mod network;

// ── Layer 2: Chain ───────────────────────────────────────────────────────────

/// On-chain interaction: transaction assembly, signing, RPC, caches.
pub mod chain;

// ── Layer 3: Auth ────────────────────────────────────────────────────────────

/// Authentication: onboarding message, sessions, roles.
pub mod auth;

// ── Layer 4: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with the response envelope and retry policies.
pub mod http;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `PerpClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes and enums
    pub use crate::shared::{AddressStr, OrderSide, OrderType};

    // Unit conversion
    pub use crate::shared::units::{from_base_units, parse_base_units, to_base_units};

    // Chain layer
    pub use crate::chain::{
        ChainRpc, GasBudget, PriceOracle, SignatureScheme, SuiKeyPair, WalletSigner,
    };

    // Domain types — market
    pub use crate::domain::market::{OrderBookResponse, TickerResponse, TradingPairResponse};

    // Domain types — trade
    pub use crate::domain::trade::{CancelOrderResponse, PlaceOrderParams};

    // Domain types — account
    pub use crate::domain::account::{
        AccountResponse, HistoryOrderResponse, OrderResponse, PageQuery, PageResponse,
        PositionResponse,
    };

    // Errors
    pub use crate::error::{AuthError, ChainError, HttpError, SdkError};

    // Network
    pub use crate::network::{PerpConfig, PerpNetwork, PythNetwork};

    // Auth
    pub use crate::auth::{AuthSession, Role};

    // Client + retry knobs
    pub use crate::client::{PerpClient, PerpClientBuilder};
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
