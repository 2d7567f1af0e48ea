//! Persistence sink.
//!
//! Wherever resolved entities end up (an on-device store, a file, a test
//! fixture) is hidden behind the [`Sink`] trait. [`MemorySink`] is the
//! in-process implementation.

mod memory;

pub use self::memory::MemorySink;
use crate::error::Result;
use crate::models::CompositeDetail;
use async_trait::async_trait;
use std::sync::Arc;

pub type SinkHandle = Arc<dyn Sink>;

/// Storage for resolved entities, keyed by their `id`.
///
/// # Examples
///
/// ```
/// use pokevault_dex::{Sink, error::Result};
///
/// async fn names_in_order(sink: &dyn Sink) -> Result<Vec<String>> {
///     let mut all = sink.fetch_all().await?;
///     all.sort_by_key(|detail| detail.id);
///     Ok(all.into_iter().map(|detail| detail.name).collect())
/// }
/// ```
#[async_trait]
pub trait Sink: Send + Sync {
    /// Store `detail`, replacing anything already stored under its id.
    async fn insert(&self, detail: CompositeDetail) -> Result<()>;

    /// Everything stored, in no particular order.
    async fn fetch_all(&self) -> Result<Vec<CompositeDetail>>;

    async fn fetch_by_id(&self, id: u32) -> Result<Option<CompositeDetail>>;

    async fn delete_all(&self) -> Result<()>;

    async fn has_stored_items(&self) -> Result<bool> {
        Ok(!self.fetch_all().await?.is_empty())
    }
}
