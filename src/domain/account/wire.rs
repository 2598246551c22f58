//! Wire types for account-scoped queries. All amounts are decimal strings.

use crate::shared::AddressStr;
use serde::Deserialize;

/// Paged envelope used by history-style endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total: Option<i64>,
    pub page_num: Option<i32>,
    pub page_size: Option<i32>,
    pub total_pages: Option<i32>,
}

/// Query for the current-orders and history endpoints.
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub symbol: Option<String>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            symbol: None,
            page_num: 1,
            page_size: 20,
        }
    }
}

impl PageQuery {
    pub(crate) fn to_query_string(&self) -> String {
        let mut out = format!("pageNum={}&pageSize={}", self.page_num, self.page_size);
        if let Some(symbol) = &self.symbol {
            out = format!("symbol={symbol}&{out}");
        }
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub id: Option<i64>,
    pub user_address: AddressStr,
    pub symbol: String,
    pub avg_entry_price: Option<String>,
    pub margin: Option<String>,
    pub leverage: Option<String>,
    pub quantity: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub position_selected_leverage: Option<String>,
    pub margin_type: Option<String>,
    pub oracle_price: Option<String>,
    pub mid_market_price: Option<String>,
    pub liquidation_price: Option<String>,
    pub side: Option<String>,
    pub position_value: Option<String>,
    pub unrealized_profit: Option<String>,
    pub roe: Option<String>,
    pub funding_due: Option<String>,
    pub funding_fee_next: Option<String>,
    pub settlement_funding_fee: Option<String>,
    pub net_margin: Option<String>,
    #[serde(default)]
    pub is_deliste: i32,
    pub position_qty_reducible: Option<String>,
    pub tp_price: Option<String>,
    pub sl_price: Option<String>,
    pub tpsl_num: Option<i32>,
}

/// An open order on the book.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Option<i64>,
    pub client_id: Option<String>,
    pub order_status: Option<String>,
    pub hash: Option<String>,
    pub symbol: String,
    pub order_type: Option<String>,
    pub creator: Option<String>,
    pub side: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub leverage: Option<String>,
    pub salt: Option<i64>,
    pub fee: Option<String>,
    pub filled_fee: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub filled_qty: Option<String>,
    pub avg_fill_price: Option<String>,
    pub open_qty: Option<String>,
    pub order_value: Option<String>,
    pub trigger_condition_type: Option<String>,
    pub trigger_price: Option<String>,
    pub trigger_direction: Option<i32>,
    pub reduce_only: Option<bool>,
    pub plan_order_type: Option<String>,
    #[serde(default)]
    pub plan_batch_id: i64,
}

/// A filled or terminated order from history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOrderResponse {
    pub id: Option<i64>,
    pub client_id: Option<String>,
    pub order_status: Option<String>,
    pub order_hash: Option<String>,
    pub symbol: String,
    pub order_type: Option<String>,
    pub creator: Option<String>,
    pub side: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub leverage: Option<String>,
    pub avg_price: Option<String>,
    pub filled_quantity: Option<String>,
    pub filled_fee: Option<String>,
    pub realized_pnl: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub entry_price: Option<String>,
    pub close_quantity: Option<String>,
    pub trigger_condition_type: Option<String>,
    pub trigger_price: Option<String>,
    pub trigger_direction: Option<i32>,
    pub reduce_only: Option<bool>,
    pub plan_order_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub address: AddressStr,
    pub can_trade: Option<bool>,
    pub update_time: Option<i64>,
    pub fee_tier: Option<String>,
    pub wallet_balance: Option<String>,
    pub total_position_margin: Option<String>,
    pub total_unrealized_profit: Option<String>,
    pub free_collateral: Option<String>,
    pub account_value: Option<String>,
    #[serde(default)]
    pub account_data_by_market: Vec<AccountDataByMarket>,
}

/// Per-market breakdown inside the account summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDataByMarket {
    pub symbol: String,
    pub position_margin: Option<String>,
    pub open_order_margin: Option<String>,
    pub unrealized_profit: Option<String>,
    pub position_value: Option<String>,
}

/// One funding settlement applied to a position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSettlementResponse {
    pub symbol: String,
    pub side: Option<String>,
    pub funding_rate: Option<String>,
    pub funding_fee: Option<String>,
    pub quantity: Option<String>,
    pub created_at: Option<i64>,
}

/// One ledger movement on the collateral balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChangeResponse {
    pub change_type: Option<String>,
    pub amount: Option<String>,
    pub wallet_balance: Option<String>,
    pub tx_digest: Option<String>,
    pub created_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_parse() {
        let page: PageResponse<OrderResponse> = serde_json::from_str(
            r#"{
                "data": [{"symbol":"ETH-PERP","side":"SELL","price":"3940"}],
                "total": 1,
                "pageNum": 1,
                "pageSize": 20,
                "totalPages": 1
            }"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].symbol, "ETH-PERP");
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn test_page_query_string() {
        let q = PageQuery {
            symbol: Some("ETH-PERP".into()),
            page_num: 2,
            page_size: 50,
        };
        assert_eq!(q.to_query_string(), "symbol=ETH-PERP&pageNum=2&pageSize=50");
        assert_eq!(PageQuery::default().to_query_string(), "pageNum=1&pageSize=20");
    }

    #[test]
    fn test_position_parse_with_sparse_fields() {
        let pos: PositionResponse = serde_json::from_str(
            r#"{"userAddress":"0xabc","symbol":"BTC-PERP","quantity":"0.5","side":"LONG"}"#,
        )
        .unwrap();
        assert_eq!(pos.symbol, "BTC-PERP");
        assert_eq!(pos.user_address.as_str(), "0xabc");
        assert_eq!(pos.side.as_deref(), Some("LONG"));
        assert!(pos.margin.is_none());
    }
}
