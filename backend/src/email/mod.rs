// Email background-job module
// A thin retry/backoff policy over a redis-list queue: jobs are enqueued by
// the HTTP handler and drained by a worker task spawned at startup.

pub mod handlers;
pub mod models;
pub mod queue;
pub mod worker;

pub use handlers::send_email_handler;
pub use models::{EmailJob, SendEmailRequest};
pub use queue::{EmailQueue, EmailQueueError};
