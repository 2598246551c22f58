//! Markets sub-client — public market data and the symbol metadata cache.
//!
//! Symbol lookups (`perp_id`, `feed_id`) are served from instance-scoped
//! maps. A miss triggers exactly one catalog fetch that fills both maps, so
//! resolving either id for any symbol afterwards costs no network traffic.

use crate::client::PerpClient;
use crate::domain::market::wire::{OrderBookResponse, TickerResponse, TradingPairResponse};
use crate::error::{HttpError, SdkError};
use crate::http::RetryPolicy;

const TICKER_PATH: &str = "/perp-trade-api/market/ticker";
const ORDER_BOOK_PATH: &str = "/perp-trade-api/market/orderbook";
const ORACLE_PATH: &str = "/perp-trade-api/market/oracle";
const TRADING_PAIR_PATH: &str = "/perp-trade-api/market/tradingPair";

pub struct Markets<'a> {
    pub(crate) client: &'a PerpClient,
}

impl<'a> Markets<'a> {
    /// 24h ticker for a trading pair.
    pub async fn ticker(&self, symbol: &str) -> Result<TickerResponse, SdkError> {
        validate_symbol(symbol)?;
        let path = format!("{TICKER_PATH}?symbol={symbol}");
        self.client
            .http
            .get_json(&path, RetryPolicy::Idempotent)
            .await
            .map_err(SdkError::Http)
    }

    /// Depth snapshot: bids descending, asks ascending.
    pub async fn order_book(&self, symbol: &str) -> Result<OrderBookResponse, SdkError> {
        validate_symbol(symbol)?;
        let path = format!("{ORDER_BOOK_PATH}?symbol={symbol}");
        self.client
            .http
            .get_json(&path, RetryPolicy::Idempotent)
            .await
            .map_err(SdkError::Http)
    }

    /// Oracle price in base units (10^18 scale).
    pub async fn oracle_price(&self, symbol: &str) -> Result<u128, SdkError> {
        validate_symbol(symbol)?;
        let path = format!("{ORACLE_PATH}?symbol={symbol}");
        self.client
            .http
            .get_json(&path, RetryPolicy::Idempotent)
            .await
            .map_err(SdkError::Http)
    }

    /// The full trading-pair catalog.
    pub async fn trading_pairs(&self) -> Result<Vec<TradingPairResponse>, SdkError> {
        self.client
            .http
            .get_json(TRADING_PAIR_PATH, RetryPolicy::Idempotent)
            .await
            .map_err(SdkError::Http)
    }

    /// Perp id (on-chain market object) for a symbol, cached.
    pub async fn perp_id(&self, symbol: &str) -> Result<String, SdkError> {
        validate_symbol(symbol)?;
        if let Some(id) = self.client.perp_ids.read().await.get(symbol) {
            return Ok(id.clone());
        }
        self.refresh_metadata().await?;
        self.client
            .perp_ids
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("unknown symbol: {symbol}")))
    }

    /// Pyth feed id for a symbol, cached.
    pub async fn feed_id(&self, symbol: &str) -> Result<String, SdkError> {
        validate_symbol(symbol)?;
        if let Some(id) = self.client.feed_ids.read().await.get(symbol) {
            return Ok(id.clone());
        }
        self.refresh_metadata().await?;
        self.client
            .feed_ids
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("unknown symbol: {symbol}")))
    }

    /// One catalog fetch fills both id maps.
    async fn refresh_metadata(&self) -> Result<(), SdkError> {
        let pairs = self.trading_pairs().await?;
        if pairs.is_empty() {
            return Err(SdkError::Http(HttpError::Remote(
                "trading-pair catalog is empty".to_string(),
            )));
        }

        let mut perp_ids = self.client.perp_ids.write().await;
        let mut feed_ids = self.client.feed_ids.write().await;
        for pair in pairs {
            perp_ids.insert(pair.symbol.clone(), pair.perp_id);
            feed_ids.insert(pair.symbol, pair.price_identifier_id);
        }
        tracing::debug!(pairs = perp_ids.len(), "market metadata refreshed");
        Ok(())
    }
}

fn validate_symbol(symbol: &str) -> Result<(), SdkError> {
    if symbol.is_empty() {
        return Err(SdkError::Validation("symbol is empty".to_string()));
    }
    Ok(())
}
