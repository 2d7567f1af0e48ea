//! Real network transport backed by [`reqwest`].

use super::check_status;
use crate::error::{ErrorKind, Result};
use crate::Transport;
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, Url};
use std::time::Duration;

/// HTTP transport.
///
/// Cheap to clone: the underlying [`reqwest::Client`] is reference counted
/// and shares its connection pool between clones.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    name: String,
    http: Client,
}

impl HttpTransport {
    /// Build a transport.
    ///
    /// `connect_timeout` bounds establishing the connection, `request_timeout`
    /// bounds the whole exchange including reading the body. Either expiring
    /// surfaces as [`ErrorKind::Transport`].
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .or_raise(|| ErrorKind::Transport("could not initialise HTTP client".to_string()))?;
        Ok(Self { name: "http".to_string(), http })
    }

    /// Change the name of the transport.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::trace!(transport = %self.name, %url, "GET");
        let response =
            self.http.get(url.clone()).send().await.or_raise(|| ErrorKind::Transport(url.to_string()))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.or_raise(|| ErrorKind::Transport(url.to_string()))?;
        check_status(status, body.to_vec())
    }
}
