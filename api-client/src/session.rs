// Current-user session state layered over the client
//
// Mirrors what a host UI needs: {user, is_loading} plus is_authenticated()
// derived from token presence. A stored token counts as authenticated even
// before the identity fetch resolves.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{LoginRequest, SignupRequest, UserPublic};
use std::sync::Arc;

pub struct Session {
    client: Arc<ApiClient>,
    user: Option<UserPublic>,
    is_loading: bool,
}

impl Session {
    /// Starts in the loading state; call initialize to hydrate the user
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            user: None,
            is_loading: true,
        }
    }

    pub fn user(&self) -> Option<&UserPublic> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Token presence, not identity-fetch success, gates authentication
    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    /// Exchange a stored token for the current user. A failed fetch clears
    /// the local user; the client's own 401 handling clears the token.
    pub async fn initialize(&mut self) {
        if self.client.is_authenticated() {
            match self.client.me().await {
                Ok(me) => {
                    self.user = Some(UserPublic {
                        id: me.id,
                        email: me.email,
                        name: None,
                    });
                }
                Err(e) => {
                    tracing::debug!("session hydration failed: {}", e);
                    self.user = None;
                }
            }
        }
        self.is_loading = false;
    }

    /// Authenticate and adopt the returned user before returning
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.user = Some(response.user);
        self.is_loading = false;
        Ok(())
    }

    /// Register and adopt the returned user before returning
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .signup(&SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.map(|n| n.to_string()),
            })
            .await?;
        self.user = Some(response.user);
        self.is_loading = false;
        Ok(())
    }

    /// Clears the user and both token copies without a network call
    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.client.logout()?;
        self.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryTokenStorage, TokenStorage};

    fn client(token: Option<&str>) -> Arc<ApiClient> {
        let storage = MemoryTokenStorage::new();
        if let Some(token) = token {
            storage.store(token).unwrap();
        }
        Arc::new(ApiClient::new("http://localhost:0", Box::new(storage)).unwrap())
    }

    #[test]
    fn test_new_session_is_loading_without_user() {
        let session = Session::new(client(Some("tok")));
        assert!(session.is_loading());
        assert!(session.user().is_none());
        // Token presence alone gates authentication
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_initialize_without_token_skips_fetch() {
        let mut session = Session::new(client(None));
        session.initialize().await;
        assert!(!session.is_loading());
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_user_and_token() {
        let mut session = Session::new(client(Some("tok")));
        session.logout().unwrap();
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
    }
}
