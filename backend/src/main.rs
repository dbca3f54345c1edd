mod auth;
mod config;
mod db;
mod email;
mod error;
mod health;
mod users;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{repository::UserRepository, AuthService, TokenService};
use config::Config;
use email::EmailQueue;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signup_handler,
        auth::handlers::login_handler,
        auth::handlers::me_handler,
        auth::handlers::change_password_handler,
        users::handlers::list_users_handler,
        users::handlers::get_user_handler,
        users::handlers::update_user_handler,
        users::handlers::delete_user_handler,
        email::handlers::send_email_handler,
        health::health_handler,
    ),
    components(
        schemas(
            auth::models::SignupRequest,
            auth::models::LoginRequest,
            auth::models::ChangePasswordRequest,
            auth::models::AuthResponse,
            auth::models::UserResponse,
            auth::models::MeResponse,
            auth::models::MessageResponse,
            users::models::UpdateUserRequest,
            email::models::SendEmailRequest,
            email::models::QueuedResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and session management"),
        (name = "users", description = "User management endpoints"),
        (name = "email", description = "Background email queue"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Starter API",
        version = "1.0.0",
        description = "REST API with JWT authentication, user management and background email jobs",
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
    pub users: UserRepository,
    pub tokens: Arc<TokenService>,
    pub email: EmailQueue,
}

impl AppState {
    pub fn new(db: PgPool, tokens: Arc<TokenService>, email: EmailQueue) -> Self {
        let users = UserRepository::new(db.clone());
        let auth = AuthService::new(users.clone(), tokens.clone());
        Self {
            db,
            auth,
            users,
            tokens,
            email,
        }
    }
}

/// Creates and configures the application router
///
/// Every route passes through the auth guard; the guard's allow-list keeps
/// signup/login/health/email-send and the API docs public. The error-path
/// layer sits outside the guard so its 401s get the shared wire shape too.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth
        .route("/api/auth/signup", post(auth::signup_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/auth/change-password", put(auth::change_password_handler))
        // Users
        .route("/api/users", get(users::list_users_handler))
        .route("/api/users/:id", get(users::get_user_handler))
        .route("/api/users/:id", put(users::update_user_handler))
        .route("/api/users/:id", delete(users::delete_user_handler))
        // Email + health
        .route("/api/email/send", post(email::send_email_handler))
        .route("/api/health", get(health::health_handler))
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth::middleware::require_auth,
        ))
        .layer(middleware::from_fn(error::with_error_path))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    tracing::info!("Starter API - Starting...");
    health::init_start_time();

    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.clone(),
        config.jwt_expires_in_secs,
    ));

    // Queue handle is lazy: the server runs without redis, jobs flow once
    // it is reachable
    let email_queue = EmailQueue::connect(&config.redis_url).expect("Invalid REDIS_URL");
    email::worker::spawn(email_queue.clone());

    let state = AppState::new(db_pool, tokens, email_queue);
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Starter API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
