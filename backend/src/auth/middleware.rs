// Request authentication middleware
//
// Every request passes through `require_auth`: routes on the explicit
// public allow-list skip token inspection entirely; everything else must
// carry a valid bearer token or is rejected before reaching any handler.

use crate::auth::{error::AuthError, token::TokenService};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Exact paths reachable without a token
pub const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/signup",
    "/api/auth/login",
    "/api/health",
    "/api/email/send",
];

/// Path prefixes reachable without a token (API documentation)
const PUBLIC_PREFIXES: &[&str] = &["/swagger-ui", "/api-docs"];

/// Whether a request path is on the public allow-list
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Identity resolved from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

/// Middleware guarding all non-public routes
///
/// The allow-list check runs first; only then is the Authorization header
/// touched. On success the resolved identity is attached to the request
/// extensions for handlers to extract. Verification is pure and shares no
/// mutable state across requests.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path();

    if is_public(path) {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            warn!("Missing Authorization header for protected endpoint: {}", path);
            AuthError::MissingToken
        })?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header missing 'Bearer ' prefix for endpoint: {}", path);
        AuthError::InvalidToken
    })?;

    let claims = tokens.verify(token)?;

    debug!("Authenticated user {} for endpoint {}", claims.sub, request.uri().path());

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Populated by require_auth; absence means the route was wired
        // outside the guard.
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Json, Router};
    use axum_test::TestServer;

    fn test_token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            "test_secret_key_for_testing_purposes".to_string(),
            604_800,
        ))
    }

    async fn whoami(user: AuthenticatedUser) -> Json<serde_json::Value> {
        Json(serde_json::json!({ "userId": user.user_id, "email": user.email }))
    }

    async fn public_ok() -> &'static str {
        "ok"
    }

    fn test_server(tokens: Arc<TokenService>) -> TestServer {
        let app = Router::new()
            .route("/api/protected", get(whoami))
            .route("/api/health", get(public_ok))
            .layer(middleware::from_fn_with_state(tokens, require_auth));
        TestServer::new(app).unwrap()
    }

    #[test]
    fn test_public_allow_list() {
        assert!(is_public("/api/auth/signup"));
        assert!(is_public("/api/auth/login"));
        assert!(is_public("/api/health"));
        assert!(is_public("/swagger-ui/index.html"));
        assert!(!is_public("/api/auth/me"));
        assert!(!is_public("/api/users"));
    }

    #[tokio::test]
    async fn test_public_route_skips_token_inspection() {
        let server = test_server(test_token_service());

        // No Authorization header, and no token ever minted
        let response = server.get("/api/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_route_rejects_missing_token() {
        let server = test_server(test_token_service());

        let response = server.get("/api/protected").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_route_rejects_malformed_header() {
        let server = test_server(test_token_service());

        for value in ["Basic dXNlcjpwYXNz", "token_without_bearer", "Bearer not.a.jwt"] {
            let response = server
                .get("/api/protected")
                .add_header(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(value).unwrap(),
                )
                .await;
            assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_protected_route_attaches_identity() {
        let tokens = test_token_service();
        let token = tokens.mint(42, "test@example.com").unwrap();
        let server = test_server(tokens);

        let response = server
            .get("/api/protected")
            .add_header(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["userId"], 42);
        assert_eq!(body["email"], "test@example.com");
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new("other_secret".to_string(), 604_800);
        let token = other.mint(1, "test@example.com").unwrap();
        let server = test_server(test_token_service());

        let response = server
            .get("/api/protected")
            .add_header(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_extractor_without_guard_rejects() {
        let req = axum::http::Request::builder()
            .uri("/api/protected")
            .body(())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
    }
}
