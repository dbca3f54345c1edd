// Error handling module for the API
// Provides the centralized error type and the single wire format every
// non-2xx response uses

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Main error type for the API
/// All handlers return Result<T, ApiError>
///
/// Each variant maps to a specific HTTP status code. Internal details
/// (database errors, hashing failures) are logged server-side and never
/// forwarded to clients.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failures from the validator crate
    /// Maps to HTTP 400 Bad Request with field-level details
    ValidationError(validator::ValidationErrors),

    /// Resource not found by ID
    /// Maps to HTTP 404 Not Found
    NotFound { resource: String, id: String },

    /// Duplicate resource conflict
    /// Maps to HTTP 409 Conflict
    Conflict { message: String },

    /// Authentication failures (bad credentials, missing/invalid/expired token)
    /// Maps to HTTP 401 Unauthorized
    Unauthorized { message: String },

    /// Database operation errors
    /// Maps to HTTP 500; the sqlx detail stays in the server log
    DatabaseError(sqlx::Error),

    /// Unexpected internal errors
    /// Maps to HTTP 500; the detail stays in the server log
    InternalError(String),
}

/// Wire format shared by every error response
///
/// `path` is stamped in by the [`with_error_path`] middleware, which is the
/// only place that knows the request URI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: String,
    pub timestamp: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            path: String::new(),
            validation_errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_error_body();
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Convert to status code plus wire body, logging per severity:
    /// error! for 500s, warn! for auth/conflict, debug! for expected
    /// client errors.
    fn to_error_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);

                let mut body = ErrorBody::new(
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                );
                body.validation_errors = Some(collect_validation_errors(errors));
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);

                (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new(
                        StatusCode::NOT_FOUND,
                        format!("{} with id {} not found", resource, id),
                    ),
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict: {}", message);

                (
                    StatusCode::CONFLICT,
                    ErrorBody::new(StatusCode::CONFLICT, message.clone()),
                )
            }
            ApiError::Unauthorized { message } => {
                warn!("Unauthorized: {}", message);

                (
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::new(StatusCode::UNAUTHORIZED, message.clone()),
                )
            }
            ApiError::DatabaseError(db_error) => {
                // Full detail stays server-side
                error!("Database error: {:?}", db_error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    ),
                )
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    ),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flatten validator output into a field -> messages map
///
/// Falls back to the validator code when no message was configured, so the
/// map never contains empty entries.
fn collect_validation_errors(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        map.insert(field.to_string(), messages);
    }
    map
}

/// Convert sqlx errors to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

/// Convert validator errors to ApiError
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

/// Response-layer middleware that stamps the request path into error bodies
///
/// Error responses are produced by `IntoResponse` impls that cannot see the
/// request URI, so the body leaves the handler with an empty `path`. This
/// middleware buffers error bodies, fills in the path, and also rewrites
/// framework-generated errors (e.g. JSON extractor rejections) into the
/// shared wire format.
pub async fn with_error_path(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, 64 * 1024).await {
        Ok(bytes) => bytes,
        Err(_) => return status.into_response(),
    };

    let body = match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(mut body) => {
            body.path = path;
            body
        }
        Err(_) => {
            // Not our shape: a rejection from the framework. Normalize it.
            let message = String::from_utf8_lossy(&bytes).trim().to_string();
            let mut body = ErrorBody::new(
                status,
                if message.is_empty() {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                } else {
                    message
                },
            );
            body.path = path;
            body
        }
    };

    let payload = match serde_json::to_vec(&body) {
        Ok(payload) => payload,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(payload))
}
