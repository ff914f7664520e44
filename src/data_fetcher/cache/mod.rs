mod core;
pub mod slot_cache;
pub mod types;

pub use self::core::TtlCache;
pub use slot_cache::SlotCache;
pub use types::{CacheEntry, CacheStats};
