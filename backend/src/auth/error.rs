// Authentication error types

use crate::error::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Authentication error types
///
/// Login failures for an unknown email and for a wrong password both map to
/// `InvalidCredentials` so the response never reveals which part failed.
#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    InvalidToken,
    ExpiredToken,
    MissingToken,
    EmailAlreadyExists,
    UserNotFound,
    CurrentPasswordIncorrect,
    DatabaseError(String),
    PasswordHashError,
    TokenGenerationError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::EmailAlreadyExists => write!(f, "Email already registered"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::CurrentPasswordIncorrect => write!(f, "Current password is incorrect"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken
            | AuthError::UserNotFound
            | AuthError::CurrentPasswordIncorrect => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Surface auth errors through the shared wire format
impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => ApiError::Unauthorized {
                message: "Invalid credentials".to_string(),
            },
            AuthError::InvalidToken => ApiError::Unauthorized {
                message: "Invalid token".to_string(),
            },
            AuthError::ExpiredToken => ApiError::Unauthorized {
                message: "Token has expired".to_string(),
            },
            AuthError::MissingToken => ApiError::Unauthorized {
                message: "Missing authentication token".to_string(),
            },
            AuthError::EmailAlreadyExists => ApiError::Conflict {
                message: "Email already registered".to_string(),
            },
            AuthError::UserNotFound => ApiError::Unauthorized {
                message: "User not found".to_string(),
            },
            AuthError::CurrentPasswordIncorrect => ApiError::Unauthorized {
                message: "Current password is incorrect".to_string(),
            },
            AuthError::DatabaseError(msg) => {
                ApiError::InternalError(format!("auth database error: {}", msg))
            }
            AuthError::PasswordHashError => {
                ApiError::InternalError("password hashing failed".to_string())
            }
            AuthError::TokenGenerationError(msg) => {
                ApiError::InternalError(format!("token generation failed: {}", msg))
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unknown email and wrong password must be indistinguishable on the wire
    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        assert_eq!(
            AuthError::EmailAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_failures_are_500() {
        assert_eq!(
            AuthError::PasswordHashError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
