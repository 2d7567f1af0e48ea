//! Concurrency-limited transport.
//!
//! Wraps another transport and caps the number of requests in flight at any
//! one time. Detail aggregation fans out per entity *and* per evolution node
//! and per type inside each entity, so the number of simultaneous requests
//! is multiplicative. Sharing one [`LimitedTransport`] between every tier
//! keeps the total against the remote service bounded.

use crate::error::{ErrorKind, Result};
use crate::{Transport, TransportHandle};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::Url;
use tokio::sync::Semaphore;

/// Transport wrapper that allows at most `permits` concurrent requests.
pub struct LimitedTransport {
    inner: TransportHandle,
    permits: Semaphore,
    limit: usize,
}

impl LimitedTransport {
    /// A limit of zero would deadlock every caller, so it is bumped to one.
    pub fn new(inner: TransportHandle, limit: usize) -> Self {
        let limit = limit.max(1);
        Self { inner, permits: Semaphore::new(limit), limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl Transport for LimitedTransport {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        // The semaphore is never closed, but don't pretend it can't be.
        let _permit =
            self.permits.acquire().await.or_raise(|| ErrorKind::Transport("request limiter closed".to_string()))?;
        self.inner.get(url).await
    }
}
