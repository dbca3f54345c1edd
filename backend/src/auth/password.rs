// Password hashing and verification

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password service for hashing and verification
///
/// Uses Argon2id with a random per-password salt; the encoded hash string
/// carries the salt and parameters.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored hash
    ///
    /// Returns Ok(false) for a mismatch; Err only when the stored hash
    /// itself is malformed.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = PasswordService::hash_password("correct horse battery").unwrap();
        assert!(PasswordService::verify_password("correct horse battery", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong password", &hash).unwrap());
    }

    // Random salts mean two hashes of the same password differ
    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("samepassword1").unwrap();
        let second = PasswordService::hash_password("samepassword1").unwrap();
        assert_ne!(first, second);
        assert!(PasswordService::verify_password("samepassword1", &first).unwrap());
        assert!(PasswordService::verify_password("samepassword1", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = PasswordService::hash_password("visiblepassword").unwrap();
        assert!(!hash.contains("visiblepassword"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        assert!(PasswordService::verify_password("whatever", "not-a-hash").is_err());
    }
}
