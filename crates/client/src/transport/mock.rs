//! In-memory transport for testing.

use super::check_status;
use crate::Transport;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

/// What the mock should answer for a given URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with the given body.
    Body(Vec<u8>),
    /// The given status with an empty body.
    Status(u16),
    /// The request never reaches a server.
    Unreachable,
}

/// In-memory transport for testing.
///
/// Routes are exact URL strings (as printed by [`Url`]). Unknown URLs answer
/// 404. Every request is counted per URL, and the highest number of requests
/// that were in flight at the same moment is tracked so tests can assert on
/// concurrency limits.
pub struct MockTransport {
    name: String,
    routes: RwLock<HashMap<String, MockResponse>>,
    hits: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    latency: Option<Duration>,
}

impl MockTransport {
    /// Create a mock transport answering 200 with each body.
    pub fn with_bodies(routes: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let routes = routes.into_iter().map(|(url, body)| (url.into(), MockResponse::Body(body.into()))).collect();
        Self {
            name: "mock".to_string(),
            routes: RwLock::new(routes),
            hits: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            latency: None,
        }
    }

    /// Change the name of the mock transport.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Delay every response by `latency` (use with a paused Tokio clock).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace the response for `url`.
    pub fn route(&self, url: impl Into<String>, response: MockResponse) -> &Self {
        self.routes.write().unwrap_or_else(PoisonError::into_inner).insert(url.into(), response);
        self
    }

    /// Add or replace a JSON response for `url`.
    pub fn route_json(&self, url: impl Into<String>, body: &serde_json::Value) -> &Self {
        self.route(url, MockResponse::Body(body.to_string().into_bytes()))
    }

    /// Number of requests made for `url` so far.
    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap_or_else(PoisonError::into_inner).get(url).copied().unwrap_or(0)
    }

    /// Number of requests made for any URL so far.
    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap_or_else(PoisonError::into_inner).values().sum()
    }

    /// The most requests that were ever in flight simultaneously.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.routes.read().unwrap_or_else(PoisonError::into_inner).get(url).cloned();
        match response {
            Some(MockResponse::Body(body)) => check_status(200, body),
            Some(MockResponse::Status(status)) => check_status(status, Vec::new()),
            Some(MockResponse::Unreachable) => exn::bail!(ErrorKind::Transport(url.to_string())),
            None => check_status(404, Vec::new()),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        let routes: [(&str, Vec<u8>); 0] = [];
        Self::with_bodies(routes)
    }
}

/// Decrements the in-flight counter even when the request future is dropped.
struct InFlight<'a>(&'a AtomicUsize);
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        let url = url.as_str();
        *self.hits.lock().unwrap_or_else(PoisonError::into_inner).entry(url.to_string()).or_insert(0) += 1;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.respond(url)
    }
}
