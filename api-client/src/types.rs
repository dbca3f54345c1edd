// Wire types mirroring the backend's request and response bodies

use serde::{Deserialize, Serialize};

/// Public user fields as returned by the server. Never carries a hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

/// Body of successful signup/login responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserPublic,
}

/// Body of `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_omits_absent_name() {
        let request = SignupRequest {
            email: "a@x.com".to_string(),
            password: "longenough1".to_string(),
            name: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("name"));
    }

    #[test]
    fn test_change_password_serializes_camel_case() {
        let request = ChangePasswordRequest {
            current_password: "old".to_string(),
            new_password: "new".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("currentPassword"));
        assert!(json.contains("newPassword"));
    }

    #[test]
    fn test_auth_response_deserializes() {
        let json = r#"{"access_token":"abc","user":{"id":1,"email":"a@x.com","name":null}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "abc");
        assert_eq!(response.user.id, 1);
        assert!(response.user.name.is_none());
    }
}
