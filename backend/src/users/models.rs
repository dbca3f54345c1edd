// User management DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Update request for a user's profile
///
/// Only the display name is mutable here; email is fixed at signup and the
/// password changes through the dedicated auth endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,
}
