// Redis-backed email job queue

use crate::email::models::{EmailJob, SendEmailRequest};
use crate::error::ApiError;
use redis::AsyncCommands;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Redis list holding pending email jobs
pub const EMAIL_QUEUE_KEY: &str = "queue:email";

/// Total delivery attempts per job before it is dropped
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay for exponential retry backoff
pub const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Seconds a worker blocks waiting for a job before polling again
const POP_TIMEOUT_SECS: f64 = 5.0;

#[derive(Debug, Error)]
pub enum EmailQueueError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("job serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<EmailQueueError> for ApiError {
    fn from(error: EmailQueueError) -> Self {
        ApiError::InternalError(format!("email queue error: {}", error))
    }
}

/// Producer/consumer handle for the email queue
///
/// Holds an unconnected redis client; connections are established per
/// operation, so the server starts (and auth endpoints work) without redis
/// being reachable.
#[derive(Clone)]
pub struct EmailQueue {
    client: redis::Client,
}

impl EmailQueue {
    /// Create a queue handle for the given redis URL
    pub fn connect(redis_url: &str) -> Result<Self, EmailQueueError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Queue an email for delivery; returns the assigned job id
    pub async fn enqueue(&self, request: SendEmailRequest) -> Result<Uuid, EmailQueueError> {
        let job = EmailJob::new(request);
        let payload = serde_json::to_string(&job)?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.lpush::<_, _, ()>(EMAIL_QUEUE_KEY, payload).await?;

        info!("Queued email job {} to {}", job.id, job.data.to);
        Ok(job.id)
    }

    /// Put a failed job back on the queue for another attempt
    pub async fn requeue(&self, job: &EmailJob) -> Result<(), EmailQueueError> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.lpush::<_, _, ()>(EMAIL_QUEUE_KEY, payload).await?;
        Ok(())
    }

    /// Block for the next job, returning None on timeout
    pub async fn pop(&self) -> Result<Option<EmailJob>, EmailQueueError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let entry: Option<(String, String)> =
            conn.brpop(EMAIL_QUEUE_KEY, POP_TIMEOUT_SECS).await?;

        match entry {
            Some((_, payload)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Delay before the next delivery attempt, or None when the job is
    /// out of attempts
    ///
    /// Exponential from the base delay: 1s after the first failure, 2s
    /// after the second; a third failure exhausts the job.
    pub fn plan_retry(attempts_made: u32) -> Option<Duration> {
        if attempts_made >= MAX_ATTEMPTS {
            return None;
        }
        Some(BACKOFF_BASE * 2u32.pow(attempts_made.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_backoff_is_exponential_from_one_second() {
        assert_eq!(EmailQueue::plan_retry(1), Some(Duration::from_secs(1)));
        assert_eq!(EmailQueue::plan_retry(2), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_jobs_stop_retrying_after_three_attempts() {
        assert_eq!(EmailQueue::plan_retry(3), None);
        assert_eq!(EmailQueue::plan_retry(4), None);
    }

    #[test]
    fn test_job_payload_roundtrip() {
        let job = EmailJob::new(SendEmailRequest {
            to: "user@example.com".to_string(),
            subject: "Welcome!".to_string(),
            body: "Thanks for signing up".to_string(),
        });
        let payload = serde_json::to_string(&job).unwrap();
        let restored: EmailJob = serde_json::from_str(&payload).unwrap();

        assert_eq!(restored.id, job.id);
        assert_eq!(restored.attempts_made, 0);
        assert_eq!(restored.data.to, "user@example.com");
    }
}
