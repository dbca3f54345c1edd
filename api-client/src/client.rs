// Typed HTTP client
//
// Owns the single token slot. All token mutations go through set_token so
// the in-memory copy and the durable copy never diverge.

use crate::error::{normalize_error, ApiError};
use crate::storage::TokenStorage;
use crate::types::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, MeResponse, SignupRequest,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};

type AuthErrorHandler = Box<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
    storage: Box<dyn TokenStorage>,
    on_auth_error: Option<AuthErrorHandler>,
}

impl ApiClient {
    /// Build a client against `base_url`, hydrating the token slot from
    /// durable storage
    pub fn new(
        base_url: impl Into<String>,
        storage: Box<dyn TokenStorage>,
    ) -> Result<Self, ApiError> {
        let token = storage.load()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: RwLock::new(token),
            storage,
            on_auth_error: None,
        })
    }

    /// Register a callback fired once per call that fails with 401, after
    /// the token has been cleared. Hosts typically redirect to login here;
    /// concurrent failing calls each fire it, so make it idempotent.
    pub fn with_auth_error_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_auth_error = Some(Box::new(handler));
        self
    }

    /// True iff a token is present, regardless of whether it is still valid
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Current token, if any
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a new user. The returned token is persisted to both copies
    /// before this returns, so is_authenticated() reflects the new session
    /// immediately.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .execute(self.http.post(self.url("/api/auth/signup")).json(request))
            .await?;
        self.set_token(Some(&response.access_token))?;
        Ok(response)
    }

    /// Authenticate and persist the returned token, as with signup
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .execute(self.http.post(self.url("/api/auth/login")).json(request))
            .await?;
        self.set_token(Some(&response.access_token))?;
        Ok(response)
    }

    /// Identity behind the current token
    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.execute(self.http.get(self.url("/api/auth/me"))).await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.execute(
            self.http
                .put(self.url("/api/auth/change-password"))
                .json(request),
        )
        .await
    }

    /// Local-only: clears both token copies, issues no network call
    pub fn logout(&self) -> Result<(), ApiError> {
        self.set_token(None)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The one writer path for the token slot
    fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        match token {
            Some(token) => self.storage.store(token)?,
            None => self.storage.clear()?,
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            token.map(|t| t.to_string());
        Ok(())
    }

    /// Send the request with the bearer token attached, normalize failures,
    /// and run the clear-and-notify path on 401
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let builder = match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_auth_failure();
        }

        Err(normalize_error(status.as_u16(), &bytes))
    }

    /// 401 path: drop both token copies, then notify the host. A storage
    /// failure here must not mask the auth failure, so it is only logged.
    fn handle_auth_failure(&self) {
        if let Err(e) = self.set_token(None) {
            tracing::warn!("failed to clear persisted token: {}", e);
        }
        if let Some(handler) = &self.on_auth_error {
            handler();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStorage;

    fn client_with_stored_token(token: Option<&str>) -> ApiClient {
        let storage = MemoryTokenStorage::new();
        if let Some(token) = token {
            storage.store(token).unwrap();
        }
        ApiClient::new("http://localhost:0", Box::new(storage)).unwrap()
    }

    #[test]
    fn test_hydrates_token_from_storage() {
        let client = client_with_stored_token(Some("stored.token"));
        assert!(client.is_authenticated());
        assert_eq!(client.token().as_deref(), Some("stored.token"));
    }

    #[test]
    fn test_starts_logged_out_without_stored_token() {
        let client = client_with_stored_token(None);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_logout_clears_token_locally() {
        let client = client_with_stored_token(Some("stored.token"));
        client.logout().unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client =
            ApiClient::new("http://localhost:3000/", Box::new(MemoryTokenStorage::new())).unwrap();
        assert_eq!(client.url("/api/auth/me"), "http://localhost:3000/api/auth/me");
    }
}
