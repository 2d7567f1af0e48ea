use crate::Context;
use crate::aggregate::{AggregateEvent, aggregate};
use crate::catalog::fetch_catalog;
use crate::error::{ErrorKind, Result};
use crate::sink::Sink;
use exn::ResultExt;
use futures::StreamExt;
use pokevault_client::TransportHandle;
use serde::Serialize;
use tracing::instrument;

/// What a [`refresh`] achieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Entries listed in the catalog.
    pub discovered: u64,
    /// Entities written to the sink.
    pub stored: u64,
    /// Entries that failed to resolve or to be written.
    pub omitted: u64,
}

/// Fetch the catalog at `list_url`, resolve every entry and write each
/// result into `sink` as soon as it is ready.
///
/// Only a catalog failure is returned as an error. Entries that fail to
/// resolve, and sink writes that fail, are logged and counted as omitted.
#[instrument(skip(transport, sink, ctx))]
pub async fn refresh(
    transport: &TransportHandle,
    sink: &dyn Sink,
    ctx: &Context,
    list_url: &str,
) -> Result<RefreshSummary> {
    let entries = fetch_catalog(transport, list_url).await?;
    let mut summary = RefreshSummary::default();

    let mut events = std::pin::pin!(aggregate(transport, ctx, entries));
    while let Some(event) = events.next().await {
        match event {
            AggregateEvent::Started | AggregateEvent::Complete => {},
            AggregateEvent::DiscoveryComplete(total) => summary.discovered = total,
            AggregateEvent::Resolved(detail) => {
                let (id, name) = (detail.id, detail.name.clone());
                match sink.insert(*detail).await.or_raise(|| ErrorKind::Sink) {
                    Ok(()) => summary.stored += 1,
                    Err(e) => {
                        tracing::warn!(id, %name, error = ?e, "could not store entity");
                        summary.omitted += 1;
                    },
                }
            },
            AggregateEvent::Omitted { .. } => summary.omitted += 1,
        }
    }

    tracing::info!(
        discovered = summary.discovered,
        stored = summary.stored,
        omitted = summary.omitted,
        "refresh complete"
    );
    Ok(summary)
}
