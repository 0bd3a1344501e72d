use sea_orm::DbErr;

use super::Error;
use crate::error::esi::EsiError;

/// Strategy for handling errors in a retry context.
pub enum ErrorRetryStrategy {
    /// Retry after the fixed configured wait (transient failures).
    Retry,
    /// Retry after the provider-supplied delay, without consuming the
    /// bounded retry budget (429 case).
    RetryAfter(u64),
    /// Failed permanently for this run.
    Fail,
}

impl Error {
    /// Determine the retry strategy for this error.
    ///
    /// Authorization errors are permanent for the current credential: the
    /// caller is expected to invalidate it and move to the next one rather
    /// than retry.
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Error::EsiError(esi) => match esi {
                EsiError::Transient(_) => ErrorRetryStrategy::Retry,
                EsiError::RateLimited { retry_after } => {
                    ErrorRetryStrategy::RetryAfter(*retry_after)
                }
                // Bad credential or bad request, retrying cannot help.
                EsiError::Unauthorized { .. }
                | EsiError::Permanent { .. }
                | EsiError::Decode(_) => ErrorRetryStrategy::Fail,
            },

            Self::DbErr(db_err) => match db_err {
                // Connection errors are transient, everything else indicates
                // a programming bug or data issue.
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                _ => ErrorRetryStrategy::Fail,
            },

            Self::WebhookError(_) => ErrorRetryStrategy::Fail,
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::WorkerError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
