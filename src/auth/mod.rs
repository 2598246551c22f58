//! Authentication — onboarding-message signing and dual-role sessions.
//!
//! The exchange authenticates wallets, not accounts: signing the fixed
//! onboarding message with an account key and POSTing the credential to
//! `/authorize` yields a bearer token bound to that wallet address.
//!
//! Two roles exist side by side. The main wallet reads positions, orders and
//! account history; the sub (trading) wallet places and cancels orders. A
//! single-wallet setup installs the same session for both roles.

pub mod client;

use crate::error::AuthError;
use serde::{Deserialize, Serialize};

pub use client::Auth;

/// The message every wallet signs to authorize. Fixed server-side.
pub const ONBOARDING_MESSAGE: &str = "Welcome to Dipcoin! Click to sign in and accept the \
Dipcoin Terms of Service. This request will not trigger a blockchain transaction or cost \
any gas fees.";

/// Which stored session a request runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Account wallet: positions, orders, history.
    Main,
    /// Trading wallet: place and cancel.
    Sub,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Sub => "sub",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bearer token bound to a wallet address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub address: String,
    pub token: String,
}

impl AuthSession {
    pub fn new(address: String, token: String) -> Result<Self, AuthError> {
        let session = Self { address, token };
        session.validate()?;
        Ok(session)
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.address.is_empty() {
            return Err(AuthError::InvalidSession("empty address"));
        }
        if self.token.is_empty() {
            return Err(AuthError::InvalidSession("empty token"));
        }
        Ok(())
    }
}

/// Body of `POST /authorize`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub signature: String,
    pub user_address: String,
    pub is_term_accepted: bool,
}

/// Payload of a successful `/authorize` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationResponse {
    pub token: String,
}
