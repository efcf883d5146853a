//! Time-boxed, size-bounded caching shared by the search engine and the
//! document content index.

mod clock;
mod ttl;

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use clock::elapsed_since;
pub use ttl::CacheEntry;
pub use ttl::CacheStats;
pub use ttl::TtlCache;
