//! Keys, intents, and signatures.
//!
//! Sui signs blake2b-256 digests of intent-prefixed payloads. A serialized
//! signature is `flag || sig || pubkey`, base64-encoded. Order credentials
//! (REST-side) use a different composite form built in `domain::trade::sign`.

use crate::chain::types::TransactionData;
use crate::error::ChainError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

type Blake2b256 = Blake2b<U32>;

// Intent prefixes: (scope, version, app-id).
const INTENT_TRANSACTION: [u8; 3] = [0, 0, 0];
const INTENT_PERSONAL_MESSAGE: [u8; 3] = [3, 0, 0];

/// The signature schemes the exchange understands.
///
/// Each variant carries both identifiers a scheme needs — the Sui flag byte
/// and the one-character tag appended to order credentials — so adding a
/// scheme is a single-site change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    Ed25519,
    Secp256k1,
}

impl SignatureScheme {
    pub const fn flag(&self) -> u8 {
        match self {
            Self::Ed25519 => 0x00,
            Self::Secp256k1 => 0x01,
        }
    }

    /// Tag char appended to composite order credentials.
    pub const fn order_tag(&self) -> char {
        match self {
            Self::Ed25519 => '1',
            Self::Secp256k1 => '2',
        }
    }

    pub fn from_flag(flag: u8) -> Result<Self, ChainError> {
        match flag {
            0x00 => Ok(Self::Ed25519),
            0x01 => Ok(Self::Secp256k1),
            other => Err(ChainError::UnsupportedScheme(other)),
        }
    }
}

/// An Ed25519 account key with its derived Sui address.
pub struct SuiKeyPair {
    key: SigningKey,
    address: String,
}

impl SuiKeyPair {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let key = SigningKey::from_bytes(&seed);
        let address = derive_address(SignatureScheme::Ed25519, &key.verifying_key().to_bytes());
        Self { key, address }
    }

    /// Parse a 32-byte hex seed, `0x` prefix optional.
    pub fn from_hex(s: &str) -> Result<Self, ChainError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| ChainError::Encode(format!("bad key hex: {e}")))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ChainError::Encode("key seed must be 32 bytes".to_string()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn generate() -> Self {
        let key = SigningKey::generate(&mut OsRng);
        let address = derive_address(SignatureScheme::Ed25519, &key.verifying_key().to_bytes());
        Self { key, address }
    }

    pub fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    /// The derived Sui address, `0x` + 64 hex chars.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign arbitrary bytes under the personal-message intent.
    ///
    /// Returns the raw signature bytes (no flag, no pubkey).
    pub fn sign_personal_message(&self, message: &[u8]) -> Result<Vec<u8>, ChainError> {
        let payload = bcs::to_bytes(&message.to_vec())
            .map_err(|e| ChainError::Encode(e.to_string()))?;
        Ok(self.sign_digest(&intent_digest(INTENT_PERSONAL_MESSAGE, &payload)))
    }

    /// Personal-message signature in the serialized `flag || sig || pubkey`
    /// base64 form wallets produce.
    pub fn sign_personal_message_serialized(&self, message: &[u8]) -> Result<String, ChainError> {
        let sig = self.sign_personal_message(message)?;
        Ok(self.serialize_signature(&sig))
    }

    /// Sign encoded transaction data for submission.
    pub fn sign_transaction(&self, data: &TransactionData) -> Result<String, ChainError> {
        let bytes = data.encode()?;
        self.sign_transaction_bytes(&bytes)
    }

    /// Sign pre-encoded transaction bytes for submission.
    pub fn sign_transaction_bytes(&self, tx_bytes: &[u8]) -> Result<String, ChainError> {
        let sig = self.sign_digest(&intent_digest(INTENT_TRANSACTION, tx_bytes));
        Ok(self.serialize_signature(&sig))
    }

    fn sign_digest(&self, digest: &[u8; 32]) -> Vec<u8> {
        self.key.sign(digest).to_bytes().to_vec()
    }

    fn serialize_signature(&self, sig: &[u8]) -> String {
        let mut out = Vec::with_capacity(1 + sig.len() + 32);
        out.push(self.scheme().flag());
        out.extend_from_slice(sig);
        out.extend_from_slice(&self.public_key_bytes());
        BASE64.encode(out)
    }
}

impl std::fmt::Debug for SuiKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("SuiKeyPair")
            .field("address", &self.address)
            .finish()
    }
}

fn intent_digest(intent: [u8; 3], payload: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(intent);
    hasher.update(payload);
    hasher.finalize().into()
}

fn derive_address(scheme: SignatureScheme, pubkey: &[u8; 32]) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update([scheme.flag()]);
    hasher.update(pubkey);
    format!("0x{}", hex::encode(hasher.finalize()))
}
