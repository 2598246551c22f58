//! Wire types for order placement and cancellation.
//!
//! Price, quantity and leverage travel as JSON numbers in base units
//! (10^18 scale), matching what the matching engine signs against.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub symbol: String,
    /// Perp id resolved from the symbol.
    pub market: String,
    pub price: u128,
    pub quantity: u128,
    /// `BUY` / `SELL`.
    pub side: String,
    /// `LIMIT` / `MARKET`.
    pub order_type: String,
    pub leverage: u128,
    pub reduce_only: bool,
    pub salt: String,
    /// Main account address the order trades for.
    pub creator: String,
    pub client_id: String,
    pub order_signature: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order_hashes: Vec<String>,
    /// Main account address the orders belong to.
    pub parent_address: String,
    /// Credential over the serialized cancel payload.
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    pub results: Vec<CancelOrderResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResult {
    pub order_hash: String,
    pub status: bool,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_wire_shape() {
        let req = PlaceOrderRequest {
            symbol: "ETH-PERP".into(),
            market: "0xfeed".into(),
            price: 10,
            quantity: 20,
            side: "SELL".into(),
            order_type: "LIMIT".into(),
            leverage: 30,
            reduce_only: false,
            salt: "123".into(),
            creator: "0xabc".into(),
            client_id: String::new(),
            order_signature: "sig".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"orderType\":\"LIMIT\""));
        assert!(json.contains("\"reduceOnly\":false"));
        assert!(json.contains("\"orderSignature\":\"sig\""));
        assert!(json.contains("\"price\":10"));
    }

    #[test]
    fn test_cancel_order_response_parse() {
        let resp: CancelOrderResponse = serde_json::from_str(
            r#"{"results":[
                {"orderHash":"be10","status":true},
                {"orderHash":"41d5","status":false,"errorCode":3002,"errorMessage":"unknown order"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.results.len(), 2);
        assert!(resp.results[0].status);
        assert_eq!(resp.results[1].error_code, Some(3002));
    }
}
