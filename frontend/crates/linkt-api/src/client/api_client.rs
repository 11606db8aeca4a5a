use crate::client::requests::{ValidateTicketRequest, VerifyCodeRequest};
use crate::{
    ApiError, ApiResult, Endpoint, LoginRequest, Navigator, RegisterRequest, RequestAuth,
};

use std::sync::Arc;

use linkt_config::ApiConfig;
use linkt_core::{AuthResponse, Route, ScanResponse, ScanStats};
use linkt_session::SessionStore;
use log::{debug, error, warn};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the Linkt REST API
pub struct ApiClient {
    pub base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `config` - Base URL and optional request timeout
    /// * `session` - Session whose token is attached and which is ended on expiry
    /// * `navigator` - Receives the redirect to the login view on expiry
    pub fn new(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
            client: builder.build()?,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Build a request for `endpoint`, with the bearer token when signed in
    fn request(&self, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut req = self.client.request(endpoint.method(), &url);

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Execute request and handle errors
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        debug!("{endpoint}");

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        if status == StatusCode::UNAUTHORIZED && endpoint.auth() == RequestAuth::Session {
            self.expire_session(endpoint);
            return Err(ApiError::session_expired());
        }

        let message = error_message(status, &text);
        debug!("{endpoint} rejected with {status}: {message}");
        Err(ApiError::rejected(status.as_u16(), message))
    }

    fn expire_session(&self, endpoint: &Endpoint) {
        warn!("{endpoint} returned 401, ending session");

        if let Err(e) = self.session.end_session() {
            error!("Failed to clear expired session from storage: {e}");
        }
        self.navigator.navigate(Route::Login);
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> ApiResult<T> {
        let req = self.request(&endpoint).json(body);
        self.execute(&endpoint, req).await
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Check credentials. Either issues a token or asks for a second factor.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.send(Endpoint::Login, request).await
    }

    /// Create an account. Usually answers with an email verification marker.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.send(Endpoint::Register, request).await
    }

    pub async fn verify_email(&self, email: &str, code: &str) -> ApiResult<AuthResponse> {
        self.send(Endpoint::VerifyEmail, &VerifyCodeRequest { email, code })
            .await
    }

    pub async fn verify_two_factor(&self, email: &str, code: &str) -> ApiResult<AuthResponse> {
        self.send(Endpoint::VerifyTwoFactor, &VerifyCodeRequest { email, code })
            .await
    }

    // =========================================================================
    // Ticket Operations
    // =========================================================================

    /// Check a scanned QR payload in at the door
    pub async fn validate_ticket(&self, event_id: i64, qr_code: &str) -> ApiResult<ScanResponse> {
        self.send(
            Endpoint::ValidateTicket { event_id },
            &ValidateTicketRequest { qr_code },
        )
        .await
    }

    /// Issued / scanned / remaining counters for an event
    pub async fn scan_stats(&self, event_id: i64) -> ApiResult<ScanStats> {
        let endpoint = Endpoint::ScanStats { event_id };
        let req = self.request(&endpoint);
        self.execute(&endpoint, req).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// `message` or `error` from a JSON body, else the body itself, else the
/// status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(message) = ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
    {
        return message.to_string();
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
