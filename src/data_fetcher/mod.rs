pub mod api;
pub mod cache;
pub mod court_names;
pub mod models;
pub mod processors;

pub use api::{SlotAggregator, UpstreamClient};
pub use court_names::CourtNameResolver;
pub use models::{ClubSummary, Region, TimeSlot};
