//! CLI Error Types

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration problem")]
    Config,
    #[display("could not set up the HTTP client")]
    Transport,
    #[display("refresh failed")]
    Refresh,
    #[display("could not write output")]
    Output,
    #[display("{_0} image(s) failed to load")]
    Images(#[error(not(source))] usize),
    #[display("interrupted")]
    Interrupted,
}
