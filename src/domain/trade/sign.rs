//! Order message codec and credential builder.
//!
//! The matching engine verifies orders against a canonical text rendering,
//! so the bytes here must match the server's builder exactly: literal `\n`
//! separators, every value double-quoted, absent numerics rendered as `0`,
//! and the fixed `dipcoin.io` domain line without a trailing comma.

use crate::chain::crypto::SuiKeyPair;
use crate::error::ChainError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

/// Additive flag bits: bit 0 ioc, bit 1 postOnly, bit 2 reduceOnly,
/// bit 3 isBuy, bit 4 orderbookOnly.
pub fn order_flags(
    ioc: bool,
    post_only: bool,
    reduce_only: bool,
    is_buy: bool,
    orderbook_only: bool,
) -> u8 {
    let mut flag = 0;
    if ioc {
        flag += 1;
    }
    if post_only {
        flag += 2;
    }
    if reduce_only {
        flag += 4;
    }
    if is_buy {
        flag += 8;
    }
    if orderbook_only {
        flag += 16;
    }
    flag
}

/// The signed form of an order, prior to rendering.
#[derive(Debug, Clone)]
pub struct OrderMessage {
    /// Perp id of the market, not the symbol.
    pub market: String,
    pub creator: String,
    pub is_long: bool,
    pub reduce_only: bool,
    pub post_only: bool,
    pub orderbook_only: bool,
    pub ioc: bool,
    pub quantity: Option<u128>,
    pub price: Option<u128>,
    pub leverage: Option<u128>,
    pub expiration: Option<u64>,
    pub salt: Option<u128>,
    pub order_flag: u8,
}

impl OrderMessage {
    /// Render the canonical text the engine verifies signatures against.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str(&format!("\"market\":\"{}\",\n", self.market));
        out.push_str(&format!("\"creator\":\"{}\",\n", self.creator));
        out.push_str(&format!("\"isLong\":\"{}\",\n", self.is_long));
        out.push_str(&format!("\"reduceOnly\":\"{}\",\n", self.reduce_only));
        out.push_str(&format!("\"postOnly\":\"{}\",\n", self.post_only));
        out.push_str(&format!("\"orderbookOnly\":\"{}\",\n", self.orderbook_only));
        out.push_str(&format!("\"ioc\":\"{}\",\n", self.ioc));
        out.push_str(&format!("\"quantity\":\"{}\",\n", opt(self.quantity)));
        out.push_str(&format!("\"price\":\"{}\",\n", opt(self.price)));
        out.push_str(&format!("\"leverage\":\"{}\",\n", opt(self.leverage)));
        out.push_str(&format!(
            "\"expiration\":\"{}\",\n",
            opt(self.expiration.map(u128::from))
        ));
        out.push_str(&format!("\"salt\":\"{}\",\n", opt(self.salt)));
        out.push_str(&format!("\"orderFlag\":\"{}\",\n", self.order_flag));
        out.push_str("\"domain\":\"dipcoin.io\"\n");
        out.push('}');
        out
    }
}

fn opt(v: Option<u128>) -> String {
    v.unwrap_or(0).to_string()
}

/// The cancel payload that gets signed and submitted.
pub fn serialized_cancel_order(order_hashes: &[String]) -> String {
    json!({ "orderHashes": order_hashes }).to_string()
}

/// Composite REST credential over a message:
/// `hex(raw personal-message signature) + scheme tag + base64(pubkey)`.
pub fn message_credential(key: &SuiKeyPair, message: &[u8]) -> Result<String, ChainError> {
    let signature = key.sign_personal_message(message)?;
    let mut out = hex::encode(signature);
    out.push(key.scheme().order_tag());
    out.push_str(&BASE64.encode(key.public_key_bytes()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::crypto::SignatureScheme;

    #[test]
    fn test_order_flags_bits() {
        assert_eq!(order_flags(false, false, false, false, false), 0);
        assert_eq!(order_flags(true, true, true, true, true), 31);
        assert_eq!(order_flags(false, false, false, true, true), 24);
        assert_eq!(order_flags(true, false, true, false, false), 5);
    }

    #[test]
    fn test_canonical_text_is_byte_exact() {
        let msg = OrderMessage {
            market: "0xfeed".to_string(),
            creator: "0xabc".to_string(),
            is_long: false,
            reduce_only: false,
            post_only: false,
            orderbook_only: true,
            ioc: false,
            quantity: Some(100000000000000000),
            price: Some(3940000000000000000000),
            leverage: Some(1000000000000000000),
            expiration: Some(0),
            salt: Some(1730000000000),
            order_flag: order_flags(false, false, false, false, true),
        };
        let expected = "{\n\
            \"market\":\"0xfeed\",\n\
            \"creator\":\"0xabc\",\n\
            \"isLong\":\"false\",\n\
            \"reduceOnly\":\"false\",\n\
            \"postOnly\":\"false\",\n\
            \"orderbookOnly\":\"true\",\n\
            \"ioc\":\"false\",\n\
            \"quantity\":\"100000000000000000\",\n\
            \"price\":\"3940000000000000000000\",\n\
            \"leverage\":\"1000000000000000000\",\n\
            \"expiration\":\"0\",\n\
            \"salt\":\"1730000000000\",\n\
            \"orderFlag\":\"16\",\n\
            \"domain\":\"dipcoin.io\"\n\
            }";
        assert_eq!(msg.canonical(), expected);
    }

    #[test]
    fn test_absent_numerics_render_zero() {
        let msg = OrderMessage {
            market: "m".to_string(),
            creator: "c".to_string(),
            is_long: true,
            reduce_only: false,
            post_only: false,
            orderbook_only: true,
            ioc: false,
            quantity: None,
            price: None,
            leverage: None,
            expiration: None,
            salt: None,
            order_flag: 24,
        };
        let text = msg.canonical();
        assert!(text.contains("\"quantity\":\"0\",\n"));
        assert!(text.contains("\"price\":\"0\",\n"));
        assert!(text.contains("\"leverage\":\"0\",\n"));
        assert!(text.contains("\"expiration\":\"0\",\n"));
        assert!(text.contains("\"salt\":\"0\",\n"));
    }

    #[test]
    fn test_cancel_payload_shape() {
        let payload =
            serialized_cancel_order(&["be105d".to_string(), "41d5".to_string()]);
        assert_eq!(payload, r#"{"orderHashes":["be105d","41d5"]}"#);
    }

    #[test]
    fn test_credential_shape() {
        let key = SuiKeyPair::from_seed([9u8; 32]);
        let cred = message_credential(&key, b"payload").unwrap();
        // 128 hex chars of signature, one tag char, then the base64 pubkey.
        assert_eq!(&cred[128..129], "1");
        assert!(hex::decode(&cred[..128]).is_ok());
        let pubkey = BASE64.decode(&cred[129..]).unwrap();
        assert_eq!(pubkey, key.public_key_bytes());
        assert_eq!(
            key.scheme().order_tag(),
            SignatureScheme::Ed25519.order_tag()
        );
    }
}
