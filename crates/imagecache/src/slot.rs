use crate::cache::{Image, ImageCache};
use crate::error::{ErrorKind, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

struct Current {
    generation: u64,
    token: CancellationToken,
}

/// Binds one display element to the image it should currently show.
///
/// Each [`load`](Self::load) supersedes the previous one: the earlier load is
/// cancelled and, should it finish anyway, its image is not delivered. This
/// is what a recycled list cell needs when it is reassigned before its old
/// image arrives.
pub struct ImageSlot {
    cache: Arc<ImageCache>,
    current: Mutex<Current>,
}

impl ImageSlot {
    pub fn new(cache: Arc<ImageCache>) -> Self {
        Self { cache, current: Mutex::new(Current { generation: 0, token: CancellationToken::new() }) }
    }

    /// Load `url` for this slot.
    ///
    /// `Ok(None)` means the load was superseded or cancelled and the slot
    /// should keep whatever it shows now.
    pub async fn load(&self, url: &str) -> Result<Option<Image>> {
        let (generation, token) = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            current.token.cancel();
            current.generation += 1;
            current.token = CancellationToken::new();
            (current.generation, current.token.clone())
        };

        match self.cache.load_cancellable(url, &token).await {
            Ok(image) if self.is_current(generation) => Ok(Some(image)),
            Ok(_) => Ok(None),
            Err(e) if *e == ErrorKind::Cancelled => {
                tracing::trace!(url, "image load superseded");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Cancel the load in progress, if any.
    pub fn cancel(&self) {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).token.cancel();
    }

    fn is_current(&self, generation: u64) -> bool {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.generation == generation && !current.token.is_cancelled()
    }
}
