//! Trade domain — order placement and cancellation.

pub mod client;
pub mod sign;
pub mod wire;

use crate::shared::{OrderSide, OrderType};

pub use client::Trade;
pub use wire::{CancelOrderResponse, CancelOrderResult};

/// Caller-facing order parameters. Price, quantity and leverage are base-unit
/// integers (10^18 scale); see `shared::units` for decimal conversion.
#[derive(Debug, Clone)]
pub struct PlaceOrderParams {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price: u128,
    pub quantity: u128,
    pub leverage: u128,
    pub reduce_only: bool,
    pub client_id: Option<String>,
}
