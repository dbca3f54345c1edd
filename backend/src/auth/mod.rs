// Authentication module
// Provides JWT-based authentication with signup, login, current-user lookup
// and password change

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{change_password_handler, login_handler, me_handler, signup_handler};
pub use middleware::AuthenticatedUser;
pub use models::{
    AuthResponse, ChangePasswordRequest, LoginRequest, SignupRequest, User, UserResponse,
};
pub use service::AuthService;
pub use token::TokenService;
