//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success envelope code. The server message is surfaced verbatim.
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    /// Structurally broken remote response (e.g. success code with no data).
    #[error("Remote service error: {0}")]
    Remote(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// On-chain layer errors: coin selection, transaction assembly, RPC, signing.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("No {coin_type} coins available")]
    NoCoinsAvailable { coin_type: String },

    #[error("{coin_type} balance is not enough: have {available}, need {required}")]
    InsufficientBalance {
        coin_type: String,
        available: u128,
        required: u128,
    },

    /// Transaction could not be assembled or BCS-encoded.
    #[error("Failed to build transaction: {0}")]
    Encode(String),

    /// The node accepted the request but reported a failure.
    #[error("Transaction submission failed: {0}")]
    Submission(String),

    /// Transport or protocol failure talking to the fullnode.
    #[error("RPC failed: {0}")]
    Rpc(String),

    #[error("Unsupported signature scheme: flag {0:#04x}")]
    UnsupportedScheme(u8),

    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A role-scoped request was attempted without a stored session.
    #[error("Not authorized for {0} role")]
    NotAuthorized(&'static str),

    #[error("Authorization failed: {0}")]
    AuthorizeFailed(String),

    /// Stored session is unusable (empty token or address).
    #[error("Invalid session: {0}")]
    InvalidSession(&'static str),
}
