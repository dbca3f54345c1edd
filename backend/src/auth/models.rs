// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
///
/// `password_hash` never leaves the repository boundary; every API response
/// goes through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user fields (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Signup request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    #[schema(example = "longenough1")]
    pub password: String,
    pub name: Option<String>,
}

/// Login request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
}

/// Password change request DTO (camelCase on the wire)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

/// Authentication response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

/// Response for GET /api/auth/me, resolved from token claims
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
}

/// Generic message response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            email: "a@x.com".to_string(),
            password: "longenough1".to_string(),
            name: None,
        }
    }

    #[test]
    fn test_signup_request_accepts_valid_input() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn test_signup_request_rejects_short_password() {
        let mut req = valid_signup();
        req.password = "short".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_signup_request_rejects_malformed_email() {
        let mut req = valid_signup();
        req.email = "not-an-email".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    // The serialized user must never carry a password hash field
    #[test]
    fn test_user_response_has_no_password_field() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            name: Some("Ada".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert!(!json.to_string().contains("argon2"));
        assert!(keys.iter().all(|k| !k.contains("password")));
    }

    #[test]
    fn test_change_password_request_uses_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_value(serde_json::json!({
            "currentPassword": "oldpassword1",
            "newPassword": "newpassword1",
        }))
        .unwrap();
        assert_eq!(req.current_password, "oldpassword1");
        assert_eq!(req.new_password, "newpassword1");
    }
}
