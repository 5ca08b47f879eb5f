//! Error types and boundary handling.
//!
//! `AppError` is the top-level error type. It wraps domain-specific errors and knows how to
//! present itself at both user-facing boundaries: as an ephemeral chat reply for commands and
//! interactions (`user_message`), and as an HTTP response for the read-only API
//! (`IntoResponse`).

pub mod config;
pub mod internal;
pub mod publisher;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, internal::InternalError, publisher::PublisherError},
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// The store is unreachable or a query failed; the operation is aborted and users are
    /// informed generically.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Binding or serving the HTTP listener failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// External publisher process failure.
    ///
    /// A concluded vote stays concluded when this happens, just without a ledger URL.
    #[error(transparent)]
    ExternalProcess(#[from] PublisherError),

    /// Channel, thread, message, user or record is absent.
    #[error("{0}")]
    NotFound(String),

    /// The destination channel for a proposal category does not exist in the guild.
    #[error("Channel #{0} was not found in this server")]
    ChannelNotFound(String),

    /// Caller lacks the role required for the operation. No state is changed.
    #[error("{0}")]
    Permission(String),

    /// Input failed validation (unknown category, duplicate title, ...). No state is changed.
    #[error("{0}")]
    Validation(String),

    /// Publishing a proposal to Discord failed; the draft is kept so publishing can be retried.
    #[error("Failed to publish proposal: {0}")]
    Publish(String),

    /// Internal error indicating a bug or corrupted data.
    #[error(transparent)]
    InternalError(#[from] InternalError),
}

/// Boxes the error to keep `AppError` small, as serenity::Error is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message shown to a Discord user when a command or interaction fails.
    ///
    /// User-correctable errors are shown verbatim. Everything else is logged and replaced
    /// with a generic message so internals never leak into chat.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_)
            | Self::ChannelNotFound(_)
            | Self::Permission(_)
            | Self::Validation(_)
            | Self::Publish(_) => self.to_string(),
            err => {
                tracing::error!("Command failed: {}", err);
                "Something went wrong on our side, please try again later.".to_string()
            }
        }
    }
}

/// Converts application errors into HTTP responses for the read-only API.
///
/// # Returns
/// - 400 Bad Request - For `Validation`
/// - 403 Forbidden - For `Permission`
/// - 404 Not Found - For `NotFound` and `ChannelNotFound`
/// - 500 Internal Server Error - For everything else, with a generic message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) | Self::ChannelNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Permission(msg) => {
                (StatusCode::FORBIDDEN, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message to avoid leaking implementation details.
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
