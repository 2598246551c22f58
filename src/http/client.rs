//! Low-level REST client — `PerpHttp`.
//!
//! Every exchange endpoint responds with the `{code, message, data}` envelope;
//! this layer unwraps it and surfaces non-200 envelope codes as
//! [`HttpError::Api`]. Authenticated requests carry the bearer token and
//! wallet address of one of two sessions (main or sub); a role-scoped request
//! without a stored session fails before any network traffic.

use crate::auth::{AuthSession, Role};
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::retry::{RetryConfig, RetryPolicy};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The exchange's uniform response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Low-level HTTP client for the exchange REST API.
pub struct PerpHttp {
    base_url: String,
    client: Client,
    /// Sessions per role. Tokens are never exposed publicly.
    main_session: Arc<RwLock<Option<AuthSession>>>,
    sub_session: Arc<RwLock<Option<AuthSession>>>,
}

impl PerpHttp {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            main_session: Arc::new(RwLock::new(None)),
            sub_session: Arc::new(RwLock::new(None)),
        }
    }

    fn slot(&self, role: Role) -> &Arc<RwLock<Option<AuthSession>>> {
        match role {
            Role::Main => &self.main_session,
            Role::Sub => &self.sub_session,
        }
    }

    /// Install (or clear) the session for a role.
    pub(crate) async fn set_session(&self, role: Role, session: Option<AuthSession>) {
        *self.slot(role).write().await = session;
    }

    pub(crate) async fn has_session(&self, role: Role) -> bool {
        self.slot(role).read().await.is_some()
    }

    /// The wallet address bound to a role's session.
    pub(crate) async fn session_address(&self, role: Role) -> Result<String, SdkError> {
        self.require_session(role)
            .await
            .map(|s| s.address)
            .map_err(SdkError::Auth)
    }

    async fn require_session(&self, role: Role) -> Result<AuthSession, AuthError> {
        self.slot(role)
            .read()
            .await
            .clone()
            .ok_or(AuthError::NotAuthorized(role.as_str()))
    }

    // ── Public (unauthenticated) requests ────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, path, None::<&()>, None, retry)
            .await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, path, Some(body), None, retry)
            .await
    }

    // ── Role-scoped requests ─────────────────────────────────────────────

    pub(crate) async fn get_as<T: DeserializeOwned>(
        &self,
        role: Role,
        path: &str,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        let session = self.require_session(role).await?;
        self.request_with_retry(reqwest::Method::GET, path, None::<&()>, Some(&session), retry)
            .await
            .map_err(SdkError::Http)
    }

    pub(crate) async fn post_as<T: DeserializeOwned, B: Serialize>(
        &self,
        role: Role,
        path: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, SdkError> {
        let session = self.require_session(role).await?;
        self.request_with_retry(reqwest::Method::POST, path, Some(body), Some(&session), retry)
            .await
            .map_err(SdkError::Http)
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        session: Option<&AuthSession>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, path, body, session).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, path, body, session).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "retrying request to {}",
                            path
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        path: &str,
        body: Option<&B>,
        session: Option<&AuthSession>,
    ) -> Result<T, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method.clone(), &url);

        if let Some(session) = session {
            req = req
                .header("Authorization", format!("Bearer {}", session.token))
                .header("X-Wallet-Address", session.address.as_str());
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let envelope = resp.json::<ApiResponse<T>>().await?;
            return unwrap_envelope(envelope, path);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>, path: &str) -> Result<T, HttpError> {
    if envelope.code != 200 {
        return Err(HttpError::Api {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }
    envelope
        .data
        .ok_or_else(|| HttpError::Remote(format!("{path}: success envelope with no data")))
}

impl Clone for PerpHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            main_session: self.main_session.clone(),
            sub_session: self.sub_session.clone(),
        }
    }
}
