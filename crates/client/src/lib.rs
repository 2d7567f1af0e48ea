//! Network plumbing shared by the rest of the workspace.
//!
//! Callers depend on the [`Transport`] trait rather than on `reqwest`
//! directly, which keeps the real client swappable for
//! [`LimitedTransport`] (bounded concurrency) or, in tests,
//! `MockTransport` (behind the `mock` feature).

pub mod error;
mod transport;

pub use crate::transport::{HttpTransport, LimitedTransport, Transport, check_status, fetch_json, parse_url};
#[cfg(any(test, feature = "mock"))]
pub use crate::transport::{MockResponse, MockTransport};
pub use reqwest::Url;
use std::sync::Arc;

pub type TransportHandle = Arc<dyn Transport>;
