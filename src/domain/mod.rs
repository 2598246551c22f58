//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — caller-facing types and re-exports
//! - `wire.rs` — raw serde structs matching the exchange API
//! - `client.rs` — sub-client with HTTP methods (and caching where it applies)

pub mod account;
pub mod market;
pub mod trade;
