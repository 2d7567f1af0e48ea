//! Client Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A client error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The string could not be turned into an absolute URL. Nothing was sent.
    #[display("invalid URL: {_0}")]
    InvalidUri(#[error(not(source))] String),
    /// Timeout, refused connection, TLS failure or a body that stopped
    /// half-way through.
    #[display("transport error: {_0}")]
    Transport(#[error(not(source))] String),
    /// 400
    #[display("bad request")]
    BadRequest,
    /// 401
    #[display("unauthorized access")]
    Unauthorized,
    /// 404
    #[display("resource not found")]
    NotFound,
    /// Any other status outside of the 2xx range.
    #[display("HTTP error with status code {status}")]
    Status {
        status: u16,
        /// Response body, lossily converted for diagnostics.
        body: String,
    },
    /// The response body was not the JSON shape we expected.
    #[display("malformed response body: {_0}")]
    Decode(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}
