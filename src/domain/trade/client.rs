//! Trade sub-client — order placement and cancellation.
//!
//! Both operations run under the sub (trading) session and sign their
//! payloads with the sub key. The creator / parent address comes from the
//! main session, so a delegated setup must log in both wallets first.

use crate::auth::Role;
use crate::chain::SuiKeyPair;
use crate::client::PerpClient;
use crate::domain::trade::sign;
use crate::domain::trade::wire::{CancelOrderRequest, CancelOrderResponse, PlaceOrderRequest};
use crate::domain::trade::PlaceOrderParams;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared;

const PLACE_ORDER_PATH: &str = "/perp-trade-api/trade/placeorder";
const CANCEL_ORDER_PATH: &str = "/perp-trade-api/trade/cancelorder";

pub struct Trade<'a> {
    pub(crate) client: &'a PerpClient,
}

impl<'a> Trade<'a> {
    /// Place an order and return its hash.
    pub async fn place(
        &self,
        params: &PlaceOrderParams,
        sub_key: &SuiKeyPair,
    ) -> Result<String, SdkError> {
        let creator = self.client.http.session_address(Role::Main).await?;
        let market = self.client.markets().perp_id(&params.symbol).await?;
        let salt = shared::salt_string();

        let is_buy = params.side.is_buy();
        // Submitted orders are always book-resting GTC: postOnly, ioc and
        // expiration are fixed server-side.
        let message = sign::OrderMessage {
            market: market.clone(),
            creator: creator.clone(),
            is_long: is_buy,
            reduce_only: params.reduce_only,
            post_only: false,
            orderbook_only: true,
            ioc: false,
            quantity: Some(params.quantity),
            price: Some(params.price),
            leverage: Some(params.leverage),
            expiration: Some(0),
            salt: Some(salt.parse().map_err(|_| {
                SdkError::Validation(format!("salt is not numeric: {salt}"))
            })?),
            order_flag: sign::order_flags(false, false, params.reduce_only, is_buy, true),
        };
        let order_signature = sign::message_credential(sub_key, message.canonical().as_bytes())
            .map_err(SdkError::Chain)?;

        let request = PlaceOrderRequest {
            symbol: params.symbol.clone(),
            market,
            price: params.price,
            quantity: params.quantity,
            side: params.side.as_str().to_string(),
            order_type: params.order_type.as_str().to_string(),
            leverage: params.leverage,
            reduce_only: params.reduce_only,
            salt,
            creator,
            client_id: params.client_id.clone().unwrap_or_default(),
            order_signature,
        };

        let hash: String = self
            .client
            .http
            .post_as(Role::Sub, PLACE_ORDER_PATH, &request, RetryPolicy::None)
            .await?;
        tracing::debug!(symbol = %params.symbol, order_hash = %hash, "order placed");
        Ok(hash)
    }

    /// Cancel orders by hash. Per-hash outcomes are reported individually.
    pub async fn cancel(
        &self,
        symbol: &str,
        order_hashes: Vec<String>,
        sub_key: &SuiKeyPair,
    ) -> Result<CancelOrderResponse, SdkError> {
        if order_hashes.is_empty() {
            return Err(SdkError::Validation("no order hashes to cancel".to_string()));
        }
        let parent_address = self.client.http.session_address(Role::Main).await?;
        let payload = sign::serialized_cancel_order(&order_hashes);
        let signature =
            sign::message_credential(sub_key, payload.as_bytes()).map_err(SdkError::Chain)?;

        let request = CancelOrderRequest {
            symbol: symbol.to_string(),
            order_hashes,
            parent_address,
            signature,
        };
        self.client
            .http
            .post_as(Role::Sub, CANCEL_ORDER_PATH, &request, RetryPolicy::None)
            .await
    }
}
