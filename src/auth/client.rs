//! Auth sub-client — authorize wallets and install role sessions.

use crate::auth::{
    AuthSession, AuthorizationRequest, AuthorizationResponse, Role, ONBOARDING_MESSAGE,
};
use crate::chain::SuiKeyPair;
use crate::client::PerpClient;
use crate::domain::trade::sign;
use crate::error::{AuthError, SdkError};
use crate::http::RetryPolicy;

const AUTHORIZE_PATH: &str = "/authorize";

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a PerpClient,
}

impl<'a> Auth<'a> {
    /// Sign the onboarding message and exchange it for a bearer token.
    ///
    /// Returns the session without installing it; `login*` methods do both.
    pub async fn authorize(&self, key: &SuiKeyPair) -> Result<AuthSession, SdkError> {
        let credential =
            sign::message_credential(key, ONBOARDING_MESSAGE.as_bytes()).map_err(SdkError::Chain)?;
        let request = AuthorizationRequest {
            signature: credential,
            user_address: key.address().to_string(),
            is_term_accepted: true,
        };

        let response: AuthorizationResponse = self
            .client
            .http
            .post_json(AUTHORIZE_PATH, &request, RetryPolicy::None)
            .await
            .map_err(SdkError::Http)?;
        if response.token.is_empty() {
            return Err(SdkError::Auth(AuthError::AuthorizeFailed(
                "server returned an empty token".to_string(),
            )));
        }

        let session = AuthSession::new(key.address().to_string(), response.token)
            .map_err(SdkError::Auth)?;
        tracing::debug!(address = %session.address, "wallet authorized");
        Ok(session)
    }

    /// Single-wallet login: one authorization, installed for both roles.
    pub async fn login(&self, main_key: &SuiKeyPair) -> Result<(), SdkError> {
        let session = self.authorize(main_key).await?;
        self.client
            .http
            .set_session(Role::Main, Some(session.clone()))
            .await;
        self.client.http.set_session(Role::Sub, Some(session)).await;
        Ok(())
    }

    /// Delegated login: the account wallet backs reads, the trading wallet
    /// backs order placement.
    pub async fn login_with_sub(
        &self,
        main_key: &SuiKeyPair,
        sub_key: &SuiKeyPair,
    ) -> Result<(), SdkError> {
        let main = self.authorize(main_key).await?;
        let sub = self.authorize(sub_key).await?;
        self.client.http.set_session(Role::Main, Some(main)).await;
        self.client.http.set_session(Role::Sub, Some(sub)).await;
        Ok(())
    }

    /// Drop both sessions. No server call; tokens simply stop being sent.
    pub async fn logout(&self) {
        self.client.http.set_session(Role::Main, None).await;
        self.client.http.set_session(Role::Sub, None).await;
    }

    pub async fn is_authorized(&self, role: Role) -> bool {
        self.client.http.has_session(role).await
    }
}
