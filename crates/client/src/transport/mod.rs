//! Transport trait and implementations.
//!
//! Everything in the workspace that talks to the network does so through the
//! [`Transport`] trait: a single `GET` that returns the body of a successful
//! response. Status mapping and JSON decoding live here too, so that every
//! implementation (real, limited, mocked) reports failures the same way.

mod http;
mod limit;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpTransport;
pub use self::limit::LimitedTransport;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{MockResponse, MockTransport};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Anything that can fetch the body behind a URL.
///
/// Implementations must run the body through [`check_status`] (or otherwise
/// produce the same [`ErrorKind`]s) so that callers can match on
/// [`NotFound`](ErrorKind::NotFound) and friends regardless of which
/// transport is plugged in.
///
/// # Examples
///
/// ```no_run
/// use pokevault_client::{Transport, error::Result, parse_url};
///
/// async fn body_length(transport: &dyn Transport) -> Result<usize> {
///     let url = parse_url("https://pokeapi.co/api/v2/pokemon/1")?;
///     Ok(transport.get(&url).await?.len())
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name of the transport (used for logging only).
    fn name(&self) -> &str;

    /// Fetch the body of `url`, failing on any non-2xx status.
    async fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Parse an absolute URL.
///
/// Relative references and garbage fail with [`ErrorKind::InvalidUri`] before
/// any network access happens.
pub fn parse_url(raw: impl AsRef<str>) -> Result<Url> {
    let raw = raw.as_ref();
    Url::parse(raw).or_raise(|| ErrorKind::InvalidUri(raw.to_string()))
}

/// Map an HTTP status onto the client's error taxonomy.
///
/// 2xx passes the body through untouched. 400, 401 and 404 have dedicated
/// variants; anything else becomes [`ErrorKind::Status`] carrying the body.
pub fn check_status(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    match status {
        200..=299 => Ok(body),
        400 => exn::bail!(ErrorKind::BadRequest),
        401 => exn::bail!(ErrorKind::Unauthorized),
        404 => exn::bail!(ErrorKind::NotFound),
        status => exn::bail!(ErrorKind::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}

/// Fetch `url` and decode the body as JSON.
///
/// The URL is validated first; a string that isn't an absolute URL never
/// reaches the transport.
pub async fn fetch_json<T: DeserializeOwned>(transport: &dyn Transport, url: &str) -> Result<T> {
    let url = parse_url(url)?;
    let body = transport.get(&url).await?;
    serde_json::from_slice(&body).or_raise(|| ErrorKind::Decode(url.to_string()))
}
