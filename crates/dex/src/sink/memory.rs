use super::Sink;
use crate::error::Result;
use crate::models::CompositeDetail;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory [`Sink`].
#[derive(Default)]
pub struct MemorySink {
    items: RwLock<BTreeMap<u32, CompositeDetail>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn insert(&self, detail: CompositeDetail) -> Result<()> {
        self.items.write().await.insert(detail.id, detail);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<CompositeDetail>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn fetch_by_id(&self, id: u32) -> Result<Option<CompositeDetail>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn delete_all(&self) -> Result<()> {
        self.items.write().await.clear();
        Ok(())
    }

    async fn has_stored_items(&self) -> Result<bool> {
        Ok(!self.is_empty().await)
    }
}
