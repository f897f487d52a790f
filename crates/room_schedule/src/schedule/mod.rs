//! Schedule data layer: fetching, normalizing and caching a room's lessons.
//!
//! The upstream API answers with one JSON array per room and day. Each element
//! is normalized on its own ([`normalize`]), classified by lesson type
//! ([`classifier`]) and collected in upstream order. [`ScheduleCache`] keeps
//! the most recently fetched day and refetches when a different date is
//! queried.

pub mod cache;
pub mod classifier;
pub mod client;
pub mod error;
pub mod normalize;
pub mod period;
mod types;

pub use cache::ScheduleCache;
pub use classifier::{classify, Classification};
pub use client::{ScheduleClient, ScheduleClientConfig, ScheduleSource, DEFAULT_BASE_URL};
pub use error::{CacheError, FetchError, MalformedElement};
pub use types::*;
