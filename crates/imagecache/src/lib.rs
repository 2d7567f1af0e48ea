//! Concurrent, time-bounded cache of decoded remote images.
//!
//! [`ImageCache`] is shared (behind an [`Arc`](std::sync::Arc)) by everything
//! that displays images. [`ImageSlot`] sits on top of it for display elements
//! that get reassigned to a different image while a load is still running.

mod cache;
pub mod error;
mod slot;

pub use crate::cache::{DEFAULT_TTL, Image, ImageCache, MAINTENANCE_INTERVAL};
pub use crate::slot::ImageSlot;
