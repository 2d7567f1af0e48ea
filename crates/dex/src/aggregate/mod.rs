//! Detail aggregation.
//!
//! Each catalog entry is an independent unit of work; see [`resolve_entry`]
//! for what one unit does and [`aggregate`] for how units are scheduled.

mod entry;
mod stream;

pub use self::entry::resolve_entry;
pub use self::stream::{AggregateEvent, aggregate, aggregate_all};
