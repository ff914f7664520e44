pub mod availability;
pub mod common;
pub mod resources;
pub mod slots;
pub mod tenants;

pub use availability::{AvailabilitySlot, RawAvailability, RawPrice, RawSlot, SlotEntry};
pub use common::{Coordinate, ParseError, Region, listing_items};
pub use resources::{RawResource, Resource};
pub use slots::{ClubSummary, TimeSlot, sort_slots};
pub use tenants::{RawTenant, Tenant};
