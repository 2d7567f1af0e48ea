//! Image Cache Error Types

use derive_more::{Display, Error};

/// An image cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for image cache operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not fetch image {_0}")]
    Fetch(#[error(not(source))] String),
    #[display("could not decode image {_0}")]
    ImageDecode(#[error(not(source))] String),
    #[display("image load cancelled")]
    Cancelled,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// The same bytes will fail to decode every time, and a cancelled load was
    /// asked to stop.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
