//! REST-layer integration tests against a mock exchange.

use dipcoin_perp_sdk::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 200,
        "message": "success",
        "data": data,
    }))
}

async fn client_for(server: &MockServer) -> PerpClient {
    PerpClient::builder()
        .network(PerpNetwork::Testnet)
        .endpoint(&server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn login_installs_sessions_and_sends_bearer_headers() {
    let server = MockServer::start().await;
    let key = SuiKeyPair::from_seed([1u8; 32]);

    Mock::given(method("POST"))
        .and(path("/authorize"))
        .respond_with(envelope(json!({ "token": "tok-main" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/curr-info/positions"))
        .and(header("Authorization", "Bearer tok-main"))
        .and(header("X-Wallet-Address", key.address()))
        .respond_with(envelope(json!([
            { "userAddress": key.address(), "symbol": "ETH-PERP", "quantity": "0.5" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(!client.auth().is_authorized(Role::Main).await);

    client.auth().login(&key).await.unwrap();
    assert!(client.auth().is_authorized(Role::Main).await);
    assert!(client.auth().is_authorized(Role::Sub).await);

    let positions = client.account().positions().await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "ETH-PERP");
}

#[tokio::test]
async fn role_request_without_session_makes_no_http_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.account().positions().await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Auth(AuthError::NotAuthorized("main"))
    ));
}

#[tokio::test]
async fn metadata_cache_fetches_catalog_once_for_both_maps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/market/tradingPair"))
        .respond_with(envelope(json!([
            { "perpId": "0xe1", "symbol": "ETH-PERP", "priceIdentifierId": "0xfe1" },
            { "perpId": "0xb2", "symbol": "BTC-PERP", "priceIdentifierId": "0xfb2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let markets = client.markets();
    assert_eq!(markets.perp_id("ETH-PERP").await.unwrap(), "0xe1");
    // Both maps were filled by the single fetch.
    assert_eq!(markets.feed_id("ETH-PERP").await.unwrap(), "0xfe1");
    assert_eq!(markets.perp_id("BTC-PERP").await.unwrap(), "0xb2");
    assert_eq!(markets.feed_id("BTC-PERP").await.unwrap(), "0xfb2");
}

#[tokio::test]
async fn metadata_cache_rejects_bad_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/market/tradingPair"))
        .respond_with(envelope(json!([
            { "perpId": "0xe1", "symbol": "ETH-PERP", "priceIdentifierId": "0xfe1" }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.markets().perp_id("").await.unwrap_err(),
        SdkError::Validation(_)
    ));
    assert!(matches!(
        client.markets().perp_id("DOGE-PERP").await.unwrap_err(),
        SdkError::NotFound(_)
    ));
}

#[tokio::test]
async fn empty_catalog_is_a_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/market/tradingPair"))
        .respond_with(envelope(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.markets().perp_id("ETH-PERP").await.unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::Remote(_))));
}

#[tokio::test]
async fn envelope_error_code_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/market/ticker"))
        .and(query_param("symbol", "ETH-PERP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 4005,
            "message": "market suspended",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.markets().ticker("ETH-PERP").await.unwrap_err() {
        SdkError::Http(HttpError::Api { code, message }) => {
            assert_eq!(code, 4005);
            assert_eq!(message, "market suspended");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn place_order_signs_with_sub_key_and_returns_hash() {
    let server = MockServer::start().await;
    let main_key = SuiKeyPair::from_seed([2u8; 32]);
    let sub_key = SuiKeyPair::from_seed([3u8; 32]);

    Mock::given(method("POST"))
        .and(path("/authorize"))
        .respond_with(envelope(json!({ "token": "tok" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/market/tradingPair"))
        .respond_with(envelope(json!([
            { "perpId": "0xe1", "symbol": "ETH-PERP", "priceIdentifierId": "0xfe1" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/perp-trade-api/trade/placeorder"))
        .and(header("X-Wallet-Address", sub_key.address()))
        .respond_with(envelope(json!("0xorderhash")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .auth()
        .login_with_sub(&main_key, &sub_key)
        .await
        .unwrap();

    let params = PlaceOrderParams {
        symbol: "ETH-PERP".to_string(),
        side: OrderSide::Sell,
        order_type: OrderType::Limit,
        price: 3_940_000_000_000_000_000_000,
        quantity: 100_000_000_000_000_000,
        leverage: 1_000_000_000_000_000_000,
        reduce_only: false,
        client_id: None,
    };
    let hash = client.trade().place(&params, &sub_key).await.unwrap();
    assert_eq!(hash, "0xorderhash");
}

#[tokio::test]
async fn cancel_order_reports_per_hash_results() {
    let server = MockServer::start().await;
    let key = SuiKeyPair::from_seed([4u8; 32]);

    Mock::given(method("POST"))
        .and(path("/authorize"))
        .respond_with(envelope(json!({ "token": "tok" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/perp-trade-api/trade/cancelorder"))
        .respond_with(envelope(json!({
            "results": [
                { "orderHash": "be10", "status": true },
                { "orderHash": "41d5", "status": false,
                  "errorCode": 3002, "errorMessage": "unknown order" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.auth().login(&key).await.unwrap();

    let resp = client
        .trade()
        .cancel("ETH-PERP", vec!["be10".into(), "41d5".into()], &key)
        .await
        .unwrap();
    assert_eq!(resp.results.len(), 2);
    assert!(resp.results[0].status);
    assert_eq!(resp.results[1].error_code, Some(3002));

    // Empty batch is rejected locally.
    let err = client
        .trade()
        .cancel("ETH-PERP", vec![], &key)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
}

#[tokio::test]
async fn paged_history_queries_carry_page_params() {
    let server = MockServer::start().await;
    let key = SuiKeyPair::from_seed([5u8; 32]);

    Mock::given(method("POST"))
        .and(path("/authorize"))
        .respond_with(envelope(json!({ "token": "tok" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/perp-trade-api/history/orders"))
        .and(query_param("symbol", "ETH-PERP"))
        .and(query_param("pageNum", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(envelope(json!({
            "data": [{ "symbol": "ETH-PERP", "orderStatus": "FILLED" }],
            "total": 11,
            "pageNum": 2,
            "pageSize": 10,
            "totalPages": 2
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.auth().login(&key).await.unwrap();

    let query = PageQuery {
        symbol: Some("ETH-PERP".to_string()),
        page_num: 2,
        page_size: 10,
    };
    let page = client.account().history_orders(&query).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total, Some(11));
    assert_eq!(page.data[0].order_status.as_deref(), Some("FILLED"));
}
