//! Webhook delivery error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    /// Discord asked us to back off; `retry_after` is the provider-supplied
    /// delay in seconds. Honored exactly and not counted against the retry
    /// budget.
    #[error("Webhook rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    /// Network failure or non-2xx response other than 429.
    #[error("Webhook delivery failed: {0}")]
    Delivery(String),

    /// All retries exhausted; the notification stays unsent so a later
    /// forwarding pass can pick it up again.
    #[error("Webhook delivery gave up after {attempts} attempt(s): {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// A message must have content or embeds.
    #[error("Refusing to send an empty webhook message")]
    EmptyMessage,
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}
