//! ESI error taxonomy.
//!
//! Every ESI response is mapped into one of these kinds so that the sync
//! orchestrator can decide between credential invalidation, bounded retry,
//! and rate-limit compliance without inspecting HTTP details.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsiError {
    /// The token is invalid or the character lacks the required role.
    /// Recoverable only by operator action; the credential is deactivated.
    #[error("ESI rejected the credential for character {character_id}: {reason}")]
    Unauthorized { character_id: i64, reason: String },

    /// Network failure, timeout, or 5xx. Retried with a fixed wait up to a
    /// bounded count.
    #[error("Transient ESI error: {0}")]
    Transient(String),

    /// ESI asked us to back off. `retry_after` carries the provider-supplied
    /// delay in seconds and is honored outside the bounded retry budget.
    #[error("ESI rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    /// Any other 4xx: the request itself is wrong and will not succeed on
    /// retry.
    #[error("ESI request failed permanently with status {status}: {body}")]
    Permanent { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode ESI response: {0}")]
    Decode(String),
}

impl EsiError {
    /// True when the owning credential should be marked invalid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for EsiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            // Connect errors, timeouts, and body read failures all retry.
            Self::Transient(err.to_string())
        }
    }
}
