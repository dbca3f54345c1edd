// HTTP handlers for user management endpoints
// All routes here sit behind the auth guard; every response body is a
// UserResponse, so password hashes never cross the API boundary.

use crate::auth::models::UserResponse;
use crate::error::ApiError;
use crate::users::models::UpdateUserRequest;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// List all users
/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "users"
)]
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    tracing::debug!("Listing users");

    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
/// GET /api/users/:id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "users"
)]
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.find_by_id(id).await?.ok_or_else(|| ApiError::NotFound {
        resource: "User".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(user.into()))
}

/// Update a user's display name
/// PUT /api/users/:id
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "users"
)]
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let user = state
        .users
        .update_name(id, request.name.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        })?;

    tracing::info!("Updated user {}", id);
    Ok(Json(user.into()))
}

/// Delete a user
/// DELETE /api/users/:id
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "users"
)]
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.users.delete_user(id).await? {
        return Err(ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}
