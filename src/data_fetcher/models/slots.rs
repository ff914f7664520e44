use super::common::Region;
use serde::{Deserialize, Serialize};

/// Normalized bookable slot, the unit served to clients and filtered by preferences.
///
/// Lists of slots are kept sorted by `(date, time)`; both are zero-padded so
/// lexical order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "tenantSlug", default, skip_serializing_if = "Option::is_none")]
    pub tenant_slug: Option<String>,
    pub club: String,
    pub location: Region,
    pub date: String,
    /// Local Bali start time, `HH:MM:SS`
    pub time: String,
    pub court: String,
    /// Indonesian rupiah, no decimals
    pub price: i64,
    pub available: bool,
    /// Minutes
    pub duration: u32,
}

impl TimeSlot {
    /// Deterministic composite key for a slot.
    pub fn make_id(
        tenant_id: &str,
        resource_id: &str,
        date: &str,
        time: &str,
        duration: u32,
    ) -> String {
        format!("{tenant_id}-{resource_id}-{date}-{time}-{duration}")
    }
}

/// Sorts slots by `(date, time)` ascending.
pub fn sort_slots(slots: &mut [TimeSlot]) {
    slots.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
}

/// Club listing entry served by `/clubs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub location: Region,
}
