use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::DynamicImage;
use pokevault_client::{TransportHandle, parse_url};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// A decoded image, shared between the cache and every caller holding it.
pub type Image = Arc<DynamicImage>;

/// How long an entry stays fresh unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// How often the maintenance task sweeps expired entries.
pub const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    image: Image,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Concurrent, time-bounded cache of decoded images keyed by URL.
///
/// Readers never block each other. Writes replace a whole entry (image and
/// timestamp together) under the write lock, so a reader sees either the old
/// entry or the new one. Two callers missing on the same URL at the same time
/// will both fetch it; the later write wins.
///
/// An entry is fresh while it is younger than the TTL. Stale entries are
/// ignored by [`get`](Self::get) and removed by [`sweep_expired`](Self::sweep_expired).
pub struct ImageCache {
    transport: TransportHandle,
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    pressure: Arc<Notify>,
    closed: CancellationToken,
}

impl ImageCache {
    pub fn new(transport: TransportHandle) -> Self {
        Self {
            transport,
            entries: RwLock::new(HashMap::new()),
            ttl: DEFAULT_TTL,
            pressure: Arc::new(Notify::new()),
            closed: CancellationToken::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cached image for `url`, if there is a fresh one. Never touches the
    /// network.
    pub fn get(&self, url: &str) -> Option<Image> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(url)?;
        entry.is_fresh(self.ttl).then(|| entry.image.clone())
    }

    /// Alias of [`get`](Self::get).
    pub fn peek(&self, url: &str) -> Option<Image> {
        self.get(url)
    }

    /// The image for `url`, from the cache when fresh, otherwise fetched,
    /// decoded and stored with a new timestamp.
    ///
    /// Bytes that fail to decode are reported as [`ErrorKind::ImageDecode`]
    /// and nothing is stored.
    pub async fn load(&self, url: &str) -> Result<Image> {
        self.load_inner(url, None).await
    }

    /// As [`load`](Self::load), but gives up with [`ErrorKind::Cancelled`] as
    /// soon as `token` is cancelled. A load cancelled at any point before its
    /// write leaves the cache untouched.
    pub async fn load_cancellable(&self, url: &str, token: &CancellationToken) -> Result<Image> {
        self.load_inner(url, Some(token)).await
    }

    #[instrument(skip(self, token))]
    async fn load_inner(&self, url: &str, token: Option<&CancellationToken>) -> Result<Image> {
        if let Some(image) = self.get(url) {
            tracing::debug!("cache hit");
            return Ok(image);
        }
        tracing::debug!("cache miss");

        let parsed = parse_url(url).or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        let fetched = match token {
            Some(token) => match token.run_until_cancelled(self.transport.get(&parsed)).await {
                Some(fetched) => fetched,
                None => exn::bail!(ErrorKind::Cancelled),
            },
            None => self.transport.get(&parsed).await,
        };
        let bytes = fetched.or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        let image = decode(url, bytes).await?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Checked under the lock so that a cancel racing the write is honored.
        if token.is_some_and(CancellationToken::is_cancelled) {
            exn::bail!(ErrorKind::Cancelled);
        }
        entries.insert(url.to_string(), CacheEntry { image: image.clone(), inserted_at: Instant::now() });
        Ok(image)
    }

    /// Remove every entry at least as old as the TTL. Returns how many were
    /// removed.
    pub fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        let removed = before - entries.len();
        tracing::debug!(removed, remaining = entries.len(), "swept expired images");
        removed
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(removed = entries.len(), "clearing image cache");
        entries.clear();
    }

    /// Hook for the platform's low-memory signal. The maintenance task
    /// responds by clearing the cache; without one running, the signal is
    /// held until a task is spawned.
    pub fn notify_memory_pressure(&self) {
        self.pressure.notify_one();
    }

    /// Start the background task that sweeps expired entries every
    /// [`MAINTENANCE_INTERVAL`] and clears the cache on memory pressure.
    ///
    /// The task only holds a weak reference to the cache. It stops when
    /// `shutdown` is cancelled or when the cache is dropped.
    pub fn spawn_maintenance(self: &Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        let pressure = self.pressure.clone();
        let closed = self.closed.clone();
        tokio::spawn(async move {
            let mut sweep = interval_at(Instant::now() + MAINTENANCE_INTERVAL, MAINTENANCE_INTERVAL);
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    () = closed.cancelled() => break,
                    _ = sweep.tick() => {
                        let Some(cache) = cache.upgrade() else { break };
                        cache.sweep_expired();
                    },
                    () = pressure.notified() => {
                        let Some(cache) = cache.upgrade() else { break };
                        tracing::info!("memory pressure; clearing image cache");
                        cache.clear();
                    },
                }
            }
            tracing::debug!("image cache maintenance stopped");
        })
    }
}

impl Drop for ImageCache {
    fn drop(&mut self) {
        self.closed.cancel();
    }
}

/// Decoding is CPU-bound, so it runs on the blocking pool.
async fn decode(url: &str, bytes: Vec<u8>) -> Result<Image> {
    tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .or_raise(|| ErrorKind::ImageDecode(url.to_string()))?
        .map(Arc::new)
        .or_raise(|| ErrorKind::ImageDecode(url.to_string()))
}
