//! Dex Error Types
//!
//! Failures bubble up as an `exn` tree: the client's [`ErrorKind`](pokevault_client::error::ErrorKind)
//! sits at the leaf and the kinds below say which stage of the pipeline it
//! broke.

use derive_more::{Display, Error};

/// A dex error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for dex operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not fetch the catalog")]
    Catalog,
    #[display("could not fetch entity detail")]
    Detail,
    #[display("could not fetch species metadata")]
    Species,
    #[display("could not fetch evolution chain")]
    Evolution,
    #[display("could not fetch artwork for evolution stage {_0}")]
    Artwork(#[error(not(source))] String),
    #[display("could not fetch type {_0}")]
    Type(#[error(not(source))] String),
    #[display("could not write to the sink")]
    Sink,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Every kind here wraps a network exchange, so whether a retry is
    /// worthwhile depends on the client error underneath; callers should
    /// walk the tree instead. Only sink writes are considered transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Sink)
    }
}
