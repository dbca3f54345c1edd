// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::AuthResponse,
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};
use std::sync::Arc;
use tracing::info;

/// Authentication service coordinating signup, login and password change
///
/// Each operation performs exactly one read and at most one write against
/// the credential store; signup and login mint exactly one token on the
/// success path.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(users: UserRepository, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user
    ///
    /// The precondition check gives a clean 409 for the common case; the
    /// insert still maps a unique violation to the same error, so under a
    /// concurrent duplicate signup exactly one call succeeds.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        if self.users.email_exists(email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(password)?;
        let user = self.users.create_user(email, &password_hash, name).await?;

        info!("Registered new user {}", user.id);

        let access_token = self.tokens.mint(user.id, &user.email)?;
        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password return the same error, so callers
    /// cannot probe which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.mint(user.id, &user.email)?;
        Ok(AuthResponse {
            access_token,
            user: user.into(),
        })
    }

    /// Change the password for an authenticated user
    ///
    /// Previously issued tokens stay valid until their natural expiry;
    /// stateless tokens have no revocation path.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !PasswordService::verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let password_hash = PasswordService::hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        info!("Password changed for user {}", user.id);
        Ok(())
    }
}
