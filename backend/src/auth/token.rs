// JWT minting and verification

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user id
    pub email: String,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for minting and verifying session tokens
///
/// Secret and lifetime are process-wide policy set at startup; there is no
/// refresh path, an expired token forces re-login.
pub struct TokenService {
    secret: String,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self { secret, ttl_seconds }
    }

    /// Mint a signed token carrying `{sub, email}` plus expiry
    pub fn mint(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token's signature and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_TTL: i64 = 604_800; // 7 days

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), TEST_TTL)
    }

    /// Build a token whose expiry is already in the past
    fn expired_token(secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "test@example.com".to_string(),
            iat: now - 1000,
            exp: now - 500,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_token_lifetime_matches_configured_ttl() {
        let service = test_token_service();
        let token = service.mint(1, "test@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TEST_TTL);
    }

    #[test]
    fn test_claims_carry_user_identity() {
        let service = test_token_service();
        let token = service.mint(42, "user@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected_as_expired() {
        let service = test_token_service();
        let token = expired_token("test_secret_key_for_testing_purposes");

        let result = service.verify(&token);
        assert!(matches!(result.unwrap_err(), AuthError::ExpiredToken));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("invalid_token_format").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1".to_string(), TEST_TTL);
        let service2 = TokenService::new("secret2".to_string(), TEST_TTL);

        let token = service1.mint(1, "test@example.com").unwrap();

        assert!(service1.verify(&token).is_ok());
        assert!(matches!(
            service2.verify(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    // Property-based tests using proptest

    proptest! {
        #[test]
        fn prop_minted_tokens_verify_with_identity(
            user_id in 1i32..1000000,
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.mint(user_id, &email)?;
            let claims = service.verify(&token)?;

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.email, email);
            prop_assert_eq!(claims.exp - claims.iat, TEST_TTL);
        }

        #[test]
        fn prop_random_strings_are_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
