//! Error types for the structwatch service.
//!
//! Domain-specific error enums live in submodules and are aggregated into a
//! single [`Error`] via `thiserror`'s `#[from]` conversions. Every external
//! call made by the sync pipeline is wrapped and converted into one of these
//! kinds so that no job can abort the scheduler with an unhandled fault.

pub mod config;
pub mod esi;
pub mod retry;
pub mod webhook;
pub mod worker;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{
        config::ConfigError, esi::EsiError, webhook::WebhookError, worker::WorkerError,
    },
    model::api::ErrorDto,
};

/// Aggregate error type for the structwatch service.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// ESI error (authorization, rate limiting, transport).
    #[error(transparent)]
    EsiError(#[from] EsiError),
    /// Webhook delivery error.
    #[error(transparent)]
    WebhookError(#[from] WebhookError),
    /// Background worker error (job validation, scheduling).
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Internal error indicating a bug in structwatch's code.
    #[error("Internal error, this indicates a bug in structwatch: {0:?}")]
    InternalError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so internal detail is not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
