//! Typed client for the starter backend.
//!
//! Mirrors the wire contract of the REST API: signup, login, current-user
//! lookup and password change, with a single bearer-token slot that is
//! persisted through a pluggable [`TokenStorage`]. Any 401 from the server
//! clears the session locally and fires the registered auth-error callback
//! so the host application can redirect to its login surface.
//!
//! [`Session`] layers a small current-user cache on top of the client for
//! hosts that want `{user, is_loading, is_authenticated}` semantics.

mod client;
mod error;
mod session;
mod storage;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::Session;
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use types::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, MeResponse,
    SignupRequest, UserPublic,
};
