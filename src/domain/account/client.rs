//! Account sub-client — positions, orders, balances and history.
//!
//! Everything here runs under the main session.

use crate::auth::Role;
use crate::client::PerpClient;
use crate::domain::account::wire::{
    AccountResponse, BalanceChangeResponse, FundingSettlementResponse, HistoryOrderResponse,
    OrderResponse, PageQuery, PageResponse, PositionResponse,
};
use crate::error::SdkError;
use crate::http::RetryPolicy;

const POSITIONS_PATH: &str = "/perp-trade-api/curr-info/positions";
const ORDERS_PATH: &str = "/perp-trade-api/curr-info/orders";
const ACCOUNT_PATH: &str = "/perp-trade-api/history/account";
const HISTORY_ORDERS_PATH: &str = "/perp-trade-api/history/orders";
const FUNDING_SETTLEMENTS_PATH: &str = "/perp-trade-api/history/funding-settlements";
const BALANCE_CHANGES_PATH: &str = "/perp-trade-api/history/balance-changes";

pub struct Account<'a> {
    pub(crate) client: &'a PerpClient,
}

impl<'a> Account<'a> {
    /// All open positions.
    pub async fn positions(&self) -> Result<Vec<PositionResponse>, SdkError> {
        self.client
            .http
            .get_as(Role::Main, POSITIONS_PATH, RetryPolicy::Idempotent)
            .await
    }

    /// Current open orders, paged.
    pub async fn orders(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<OrderResponse>, SdkError> {
        let path = format!("{ORDERS_PATH}?{}", query.to_query_string());
        self.client
            .http
            .get_as(Role::Main, &path, RetryPolicy::Idempotent)
            .await
    }

    /// Account-level balance and margin summary.
    pub async fn account(&self) -> Result<AccountResponse, SdkError> {
        self.client
            .http
            .get_as(Role::Main, ACCOUNT_PATH, RetryPolicy::Idempotent)
            .await
    }

    /// Filled and terminated orders, paged.
    pub async fn history_orders(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<HistoryOrderResponse>, SdkError> {
        let path = format!("{HISTORY_ORDERS_PATH}?{}", query.to_query_string());
        self.client
            .http
            .get_as(Role::Main, &path, RetryPolicy::Idempotent)
            .await
    }

    /// Funding settlements applied to the account's positions, paged.
    pub async fn funding_settlements(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<FundingSettlementResponse>, SdkError> {
        let path = format!("{FUNDING_SETTLEMENTS_PATH}?{}", query.to_query_string());
        self.client
            .http
            .get_as(Role::Main, &path, RetryPolicy::Idempotent)
            .await
    }

    /// Collateral ledger movements (deposits, withdrawals, fees), paged.
    pub async fn balance_changes(
        &self,
        query: &PageQuery,
    ) -> Result<PageResponse<BalanceChangeResponse>, SdkError> {
        let path = format!("{BALANCE_CHANGES_PATH}?{}", query.to_query_string());
        self.client
            .http
            .get_as(Role::Main, &path, RetryPolicy::Idempotent)
            .await
    }
}
