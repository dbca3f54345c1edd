// User management module
// Protected CRUD over the same users table the credential store owns;
// creation happens only through signup.

pub mod handlers;
pub mod models;

pub use handlers::{delete_user_handler, get_user_handler, list_users_handler, update_user_handler};
pub use models::UpdateUserRequest;
