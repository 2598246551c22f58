//! Account domain — positions, orders, balances, history.

pub mod client;
pub mod wire;

pub use client::Account;
pub use wire::{
    AccountDataByMarket, AccountResponse, BalanceChangeResponse, FundingSettlementResponse,
    HistoryOrderResponse, OrderResponse, PageQuery, PageResponse, PositionResponse,
};
