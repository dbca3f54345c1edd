// Email delivery worker
// Drains the redis queue one job at a time; a failed delivery is requeued
// after its backoff delay until the attempt budget runs out.

use crate::email::models::{EmailJob, SendEmailRequest};
use crate::email::queue::{EmailQueue, EmailQueueError, MAX_ATTEMPTS};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Pause after a lost redis connection before reconnecting
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Spawn the background worker loop
pub fn spawn(queue: EmailQueue) -> JoinHandle<()> {
    tokio::spawn(run(queue))
}

async fn run(queue: EmailQueue) {
    info!("Email worker started");
    loop {
        match queue.pop().await {
            Ok(Some(job)) => process_job(&queue, job).await,
            Ok(None) => {} // pop timed out, loop around
            Err(e) => {
                warn!("Email worker cannot reach redis: {}", e);
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

async fn process_job(queue: &EmailQueue, mut job: EmailJob) {
    info!("Processing email job {}", job.id);

    match deliver(&job.data).await {
        Ok(()) => info!("Email sent to {} (job {})", job.data.to, job.id),
        Err(e) => {
            job.attempts_made += 1;
            match EmailQueue::plan_retry(job.attempts_made) {
                Some(delay) => {
                    warn!(
                        "Email job {} failed (attempt {}/{}), retrying in {:?}: {}",
                        job.id, job.attempts_made, MAX_ATTEMPTS, delay, e
                    );
                    tokio::time::sleep(delay).await;
                    if let Err(e) = queue.requeue(&job).await {
                        error!("Failed to requeue email job {}: {}", job.id, e);
                    }
                }
                None => {
                    error!(
                        "Email job {} dropped after {} attempts: {}",
                        job.id, job.attempts_made, e
                    );
                }
            }
        }
    }
}

/// Deliver one email
///
/// Simulated delivery: logs and sleeps. TODO: wire an SMTP or provider
/// transport here once one is chosen.
async fn deliver(request: &SendEmailRequest) -> Result<(), EmailQueueError> {
    debug!("Sending email to {}: {}", request.to, request.subject);
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(())
}
