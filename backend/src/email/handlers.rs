// HTTP handler for queuing emails

use crate::email::models::{QueuedResponse, SendEmailRequest};
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

/// Queue an email for background delivery
/// POST /api/email/send
#[utoipa::path(
    post,
    path = "/api/email/send",
    request_body = SendEmailRequest,
    responses(
        (status = 201, description = "Email queued", body = QueuedResponse),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Queue unavailable")
    ),
    tag = "email"
)]
pub async fn send_email_handler(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<(StatusCode, Json<QueuedResponse>), ApiError> {
    request.validate()?;

    let job_id = state.email.enqueue(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(QueuedResponse {
            job_id,
            message: "Email queued successfully".to_string(),
        }),
    ))
}
