//! Market domain — public market data and symbol metadata.

pub mod client;
pub mod wire;

pub use client::Markets;
pub use wire::{OrderBookResponse, PerpOiLimit, TickerResponse, TradingPairResponse};
