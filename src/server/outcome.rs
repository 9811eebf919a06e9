//! Classification of server responses.
//!
//! Each request ends in exactly one [`Outcome`]: the record was found (any
//! 2xx), it is missing (404), or the request failed. Failures are reported to
//! the user and never reach a callback.

use crate::logging::{Logger, Notifier};
use thiserror::Error;

/// Why a request did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// The server could not be reached at all (status 0)
    #[error("Could not reach server")]
    NetworkUnreachable { detail: String },

    #[error("Internal error: Unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("Internal error: Malformed server response: {0}")]
    InvalidBody(String),

    #[error("Internal error: Called requestInfo without barcode")]
    MissingBarcode,

    #[error("Internal error: Invalid server URL {0}")]
    InvalidUrl(String),
}

/// Coarse class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    NotFound,
    Unreachable,
    Unexpected(u16),
}

impl StatusClass {
    /// Status 0 stands for "no response at all".
    pub fn of(status: u16) -> Self {
        match status {
            0 => StatusClass::Unreachable,
            200..=299 => StatusClass::Success,
            404 => StatusClass::NotFound,
            other => StatusClass::Unexpected(other),
        }
    }
}

/// Result of one server request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Found(T),
    Missing,
    Failed(ServerError),
}

/// User-facing messages for one kind of request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Shown while the request is underway
    pub delay: &'static str,
    /// Shown on success
    pub found: &'static str,
    /// Shown on 404
    pub missing: &'static str,
}

impl<T> Outcome<T> {
    /// Build an outcome from a status code; `body` is only consulted on
    /// success.
    pub fn from_status(status: u16, body: impl FnOnce() -> Result<T, ServerError>) -> Self {
        match StatusClass::of(status) {
            StatusClass::Success => match body() {
                Ok(value) => Outcome::Found(value),
                Err(err) => Outcome::Failed(err),
            },
            StatusClass::NotFound => Outcome::Missing,
            StatusClass::Unreachable => Outcome::Failed(ServerError::NetworkUnreachable {
                detail: "status 0".to_string(),
            }),
            StatusClass::Unexpected(status) => Outcome::Failed(ServerError::UnexpectedStatus(status)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::Missing => Outcome::Missing,
            Outcome::Failed(err) => Outcome::Failed(err),
        }
    }

    /// Notify the user about this outcome without running any callback.
    pub fn report<N: Notifier>(&self, logger: &mut Logger<N>, labels: &Labels) {
        match self {
            Outcome::Found(_) => logger.info(labels.found),
            Outcome::Missing => logger.info(labels.missing),
            Outcome::Failed(err) => logger.error(&err.to_string()),
        }
    }

    /// Notify the user, then hand the outcome to exactly one of the
    /// callbacks. Failures invoke neither.
    ///
    /// `cx` is passed through to whichever callback runs, so both callbacks
    /// can work on the same state.
    pub fn deliver<N, C>(
        self,
        logger: &mut Logger<N>,
        labels: &Labels,
        cx: &mut C,
        on_found: impl FnOnce(&mut C, T),
        on_missing: impl FnOnce(&mut C),
    ) where
        N: Notifier,
    {
        self.report(logger, labels);
        match self {
            Outcome::Found(value) => on_found(cx, value),
            Outcome::Missing => on_missing(cx),
            Outcome::Failed(_) => {}
        }
    }
}
