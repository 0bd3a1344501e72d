//! Background worker error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    /// A job exceeded its hard wall-clock budget and was terminated. State
    /// not yet committed when the budget expired is discarded.
    #[error("Job {job} exceeded its time limit of {limit_secs}s and was terminated")]
    TimedOut { job: String, limit_secs: u64 },
}
