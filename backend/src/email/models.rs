// Email job data models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for queuing an email
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendEmailRequest {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "user@example.com")]
    pub to: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Welcome!")]
    pub subject: String,
    pub body: String,
}

/// A queued email job as stored on the redis list
///
/// `attempts_made` counts failed delivery attempts so far; the worker gives
/// up once it reaches the configured maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    pub id: Uuid,
    pub attempts_made: u32,
    pub data: SendEmailRequest,
}

impl EmailJob {
    pub fn new(data: SendEmailRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            attempts_made: 0,
            data,
        }
    }
}

/// Response after a job was queued
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueuedResponse {
    pub job_id: Uuid,
    pub message: String,
}
