//! Wire types for public market-data endpoints.

use serde::Deserialize;

/// 24h ticker for one trading pair. Prices and sizes are decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerResponse {
    pub symbol: String,
    pub last_price: Option<String>,
    pub mark_price: Option<String>,
    pub best_ask_price: Option<String>,
    pub best_bid_price: Option<String>,
    pub high24h: Option<String>,
    pub low24h: Option<String>,
    pub open24h: Option<String>,
    pub amount24h: Option<String>,
    pub volume24h: Option<String>,
    pub best_ask_amount: Option<String>,
    pub best_bid_amount: Option<String>,
    pub timestamp: Option<i64>,
    pub change24h: Option<String>,
    pub rate24h: Option<String>,
    pub open_price: Option<String>,
    pub oracle_price: Option<String>,
    pub funding_rate: Option<String>,
    pub open_interest: Option<String>,
}

/// Depth snapshot: rows of `[price, quantity]` strings, bids descending and
/// asks ascending.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookResponse {
    pub bids: Vec<Vec<String>>,
    pub asks: Vec<Vec<String>>,
}

/// One entry of the trading-pair catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPairResponse {
    pub perp_id: String,
    pub symbol: String,
    pub coin_name: Option<String>,
    pub status: Option<i32>,
    pub initial_margin: Option<String>,
    pub maintenance_margin: Option<String>,
    pub maker_fee: Option<String>,
    pub taker_fee: Option<String>,
    pub step_size: Option<String>,
    pub tick_size: Option<String>,
    pub max_qty_limit: Option<String>,
    pub max_qty_market: Option<String>,
    pub fee_pool_address: Option<String>,
    pub mtb_long: Option<String>,
    pub mtb_short: Option<String>,
    pub max_funding: Option<String>,
    pub max_leverage: Option<i32>,
    #[serde(default, rename = "perpOiLimitVOList")]
    pub oi_limits: Vec<PerpOiLimit>,
    /// Pyth price feed id.
    #[serde(default)]
    pub price_identifier_id: String,
}

/// Open-interest cap for a leverage tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpOiLimit {
    pub leverage: Option<i32>,
    pub oi_limit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trading_pair_parse() {
        let pair: TradingPairResponse = serde_json::from_str(
            r#"{
                "perpId": "0xfeed",
                "symbol": "ETH-PERP",
                "status": 1,
                "tickSize": "10000000000000000",
                "maxLeverage": 20,
                "perpOiLimitVOList": [{"leverage": 10, "oiLimit": "5000000"}],
                "priceIdentifierId": "0xff61"
            }"#,
        )
        .unwrap();
        assert_eq!(pair.perp_id, "0xfeed");
        assert_eq!(pair.price_identifier_id, "0xff61");
        assert_eq!(pair.oi_limits.len(), 1);
    }

    #[test]
    fn test_order_book_rows() {
        let book: OrderBookResponse = serde_json::from_str(
            r#"{"bids":[["3940","1.5"],["3939","2"]],"asks":[["3941","0.5"]]}"#,
        )
        .unwrap();
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.asks[0], vec!["3941", "0.5"]);
    }
}
