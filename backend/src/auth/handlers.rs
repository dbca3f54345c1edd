// HTTP handlers for authentication endpoints

use crate::auth::{
    middleware::AuthenticatedUser,
    models::{
        AuthResponse, ChangePasswordRequest, LoginRequest, MeResponse, MessageResponse,
        SignupRequest,
    },
};
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

/// Register a new user
/// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created, session token issued", body = AuthResponse),
        (status = 400, description = "Validation failure with field-level messages"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let response = state
        .auth
        .signup(&request.email, &request.password, request.name.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let response = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(response))
}

/// Get the identity behind the presented token
/// GET /api/auth/me
///
/// Resolved purely from verified claims; no database read.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user identity", body = MeResponse),
        (status = 401, description = "Token missing, invalid or expired")
    ),
    tag = "auth"
)]
pub async fn me_handler(user: AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.user_id,
        email: user.email,
    })
}

/// Change the current user's password
/// PUT /api/auth/change-password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Missing auth or incorrect current password")
    ),
    tag = "auth"
)]
pub async fn change_password_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    state
        .auth
        .change_password(user.user_id, &request.current_password, &request.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
