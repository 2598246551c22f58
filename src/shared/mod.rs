//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the exchange API sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod units;

pub use units::{from_base_units, to_base_units, UnitsError, BASE_DECIMALS};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

// ─── AddressStr ──────────────────────────────────────────────────────────────

/// A Sui address stored as a `0x`-prefixed hex string.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressStr(String);

impl AddressStr {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AddressStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AddressStr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AddressStr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl FromStr for AddressStr {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AddressStr(s.to_string()))
    }
}

impl Serialize for AddressStr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AddressStr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AddressStr(s))
    }
}

// ─── OrderSide ───────────────────────────────────────────────────────────────

/// Order side, serialized as the API codes `BUY` / `SELL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderType ───────────────────────────────────────────────────────────────

/// Order type codes understood by the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
    /// Liquidation fills (server-originated; never submitted by the SDK).
    Liq,
    /// Auto-deleverage fills (server-originated).
    Adl,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::Liq => "LIQ",
            Self::Adl => "ADL",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Salt / nonce ────────────────────────────────────────────────────────────

/// Generate a fresh 8-byte salt: wall-clock milliseconds plus three random
/// increments in `[0, 1_000_000]`, packed big-endian.
///
/// Used both as the `vector<u8>` nonce of on-chain calls and (as a decimal
/// string) as the salt of signed order messages.
pub fn salt() -> [u8; 8] {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut rng = rand::thread_rng();
    let value = millis
        + rng.gen_range(0..=1_000_000u64)
        + rng.gen_range(0..=1_000_000u64)
        + rng.gen_range(0..=1_000_000u64);
    value.to_be_bytes()
}

/// The salt as a decimal string, for order message serialization.
pub fn salt_string() -> String {
    u64::from_be_bytes(salt()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_str_serde() {
        let addr = AddressStr::new("0x05a630c36e8a6cb9ff99e2d2595e55ec70d002a8");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x05a630c36e8a6cb9ff99e2d2595e55ec70d002a8\"");
        let back: AddressStr = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }

    #[test]
    fn test_order_side_serde() {
        let buy: OrderSide = serde_json::from_str("\"BUY\"").unwrap();
        assert_eq!(buy, OrderSide::Buy);
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn test_order_type_codes() {
        assert_eq!(OrderType::Limit.as_str(), "LIMIT");
        let t: OrderType = serde_json::from_str("\"MARKET\"").unwrap();
        assert_eq!(t, OrderType::Market);
    }

    #[test]
    fn test_salt_tracks_wall_clock() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let value = u64::from_be_bytes(salt());
        assert!(value >= before);
        assert!(value <= before + 3_000_000 + 10_000);
    }

    #[test]
    fn test_salt_is_big_endian() {
        let bytes = salt();
        let value = u64::from_be_bytes(bytes);
        assert_eq!(bytes, value.to_be_bytes());
        // Timestamps fit well below 2^63; the top byte must be zero for decades.
        assert_eq!(bytes[0], 0);
    }
}
