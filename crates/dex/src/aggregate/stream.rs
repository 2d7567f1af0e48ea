use super::entry::resolve_entry;
use crate::Context;
use crate::models::{CatalogEntry, CompositeDetail};
use async_stream::stream;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use pokevault_client::TransportHandle;

/// Progress events emitted by [`aggregate`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete), exactly once, with the
///    number of entries to resolve.
/// 3. [`Resolved`](Self::Resolved) or [`Omitted`](Self::Omitted), once per
///    entry, in whatever order the entries finish.
/// 4. [`Complete`](Self::Complete), exactly once.
#[derive(Debug)]
pub enum AggregateEvent {
    Started,
    DiscoveryComplete(u64),
    Resolved(Box<CompositeDetail>),
    /// The entry failed and was left out; the reason has already been logged.
    Omitted { name: String },
    Complete,
}

/// Streams [`AggregateEvent`]s while resolving every entry in `entries`.
///
/// At most `ctx.max_concurrency()` entries are in flight at once; further
/// entries are promoted as others complete. A failing entry never ends the
/// stream or affects its siblings.
pub fn aggregate<'a>(
    transport: &'a TransportHandle,
    ctx: &'a Context,
    entries: Vec<CatalogEntry>,
) -> impl Stream<Item = AggregateEvent> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield AggregateEvent::Started;
        // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
        yield AggregateEvent::DiscoveryComplete(u64::try_from(entries.len()).unwrap_or(0));

        let mut futures: Vec<_> = entries
            .into_iter()
            .map(|entry| async move {
                let result = resolve_entry(transport, ctx, &entry).await;
                (entry, result)
            })
            .collect();
        let mut processing = FuturesUnordered::new();
        processing.extend(futures.drain(..ctx.max_concurrency().min(futures.len())));
        while let Some((entry, result)) = processing.next().await {
            // Pop-n-push, but FIFO instead of LIFO.
            if !futures.is_empty() {
                processing.push(futures.remove(0));
            }
            match result {
                Ok(detail) => {
                    yield AggregateEvent::Resolved(Box::new(detail));
                },
                Err(e) => {
                    tracing::warn!(name = %entry.name, error = ?e, "omitting entry");
                    yield AggregateEvent::Omitted { name: entry.name };
                },
            }
        }

        yield AggregateEvent::Complete;
    })
}

/// Resolve every entry and collect the ones that succeeded.
///
/// The result is in completion order; sort by `id` for the canonical order.
pub async fn aggregate_all(
    transport: &TransportHandle,
    ctx: &Context,
    entries: Vec<CatalogEntry>,
) -> Vec<CompositeDetail> {
    aggregate(transport, ctx, entries)
        .filter_map(|event| async move {
            match event {
                AggregateEvent::Resolved(detail) => Some(*detail),
                _ => None,
            }
        })
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ctx, entry, route_standalone, route_type, species_url};
    use pokevault_client::{MockResponse, MockTransport};
    use std::sync::Arc;
    use std::time::Duration;

    const NAMES: [&str; 5] = ["bulbasaur", "charmander", "squirtle", "pikachu", "eevee"];

    fn world() -> Arc<MockTransport> {
        let mock = Arc::new(MockTransport::default());
        for (id, name) in (1..).zip(NAMES) {
            route_standalone(&mock, id, name, &["normal"]);
        }
        route_type(&mock, "normal", &["fighting"]);
        mock
    }

    fn entries() -> Vec<CatalogEntry> {
        NAMES.iter().map(|name| entry(name)).collect()
    }

    #[tokio::test]
    async fn test_event_order() {
        let transport: TransportHandle = world();
        let ctx = ctx();

        let events: Vec<_> = aggregate(&transport, &ctx, entries()).collect().await;

        assert_eq!(events.len(), 8);
        assert!(matches!(events[0], AggregateEvent::Started));
        assert!(matches!(events[1], AggregateEvent::DiscoveryComplete(5)));
        assert!(events[2..7].iter().all(|event| matches!(event, AggregateEvent::Resolved(_))));
        assert!(matches!(events[7], AggregateEvent::Complete));
    }

    #[tokio::test]
    async fn test_one_failure_is_isolated() {
        for _ in 0..10 {
            let mock = world();
            mock.route(species_url(3), MockResponse::Unreachable);
            let transport: TransportHandle = mock;
            let ctx = ctx();

            let mut details = aggregate_all(&transport, &ctx, entries()).await;
            details.sort_by_key(|detail| detail.id);

            let ids: Vec<_> = details.iter().map(|detail| detail.id).collect();
            assert_eq!(ids, [1, 2, 4, 5]);
        }
    }

    #[tokio::test]
    async fn test_failure_yields_omitted() {
        let mock = world();
        mock.route(species_url(3), MockResponse::Status(404));
        let transport: TransportHandle = mock;
        let ctx = ctx();

        let omitted: Vec<_> = aggregate(&transport, &ctx, entries())
            .filter_map(|event| async move {
                match event {
                    AggregateEvent::Omitted { name } => Some(name),
                    _ => None,
                }
            })
            .collect()
            .await;
        assert_eq!(omitted, ["squirtle"]);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let transport: TransportHandle = world();
        let ctx = ctx();

        let events: Vec<_> = aggregate(&transport, &ctx, vec![]).collect().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], AggregateEvent::DiscoveryComplete(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_bounds_entries_in_flight() {
        // Without types an entry makes its requests strictly one after
        // another, so a window of one means one request at a time.
        let mock = Arc::new(MockTransport::default().with_latency(Duration::from_millis(5)));
        for (id, name) in (1..).zip(NAMES) {
            route_standalone(&mock, id, name, &[]);
        }
        let transport: TransportHandle = mock.clone();
        let ctx = ctx().with_max_concurrency(1);

        let details = aggregate_all(&transport, &ctx, entries()).await;

        assert_eq!(details.len(), 5);
        assert_eq!(mock.peak_in_flight(), 1);
    }
}
