use crate::data_fetcher::court_names::placeholder_name;
use crate::data_fetcher::models::{AvailabilitySlot, Region, Tenant, TimeSlot};
use std::collections::HashMap;

/// Flattens a tenant's availability into [`TimeSlot`]s.
///
/// `court_names` maps resource ids to resolved names; unknown resources get
/// the placeholder name. Availability is expected to be normalized already
/// (Bali start times, integer prices).
pub fn build_time_slots(
    tenant: &Tenant,
    location: Region,
    availability: &[AvailabilitySlot],
    court_names: &HashMap<String, String>,
) -> Vec<TimeSlot> {
    availability
        .iter()
        .flat_map(|entry| {
            let court = court_names
                .get(&entry.resource_id)
                .cloned()
                .unwrap_or_else(|| placeholder_name(&entry.resource_id));
            let date = entry.date();

            entry.slots.iter().map(move |slot| TimeSlot {
                id: TimeSlot::make_id(
                    &tenant.id,
                    &entry.resource_id,
                    date,
                    &slot.start_time,
                    slot.duration,
                ),
                tenant_id: tenant.id.clone(),
                tenant_slug: tenant.slug.clone(),
                club: tenant.name.clone(),
                location,
                date: date.to_string(),
                time: slot.start_time.clone(),
                court: court.clone(),
                price: slot.price,
                available: true,
                duration: slot.duration,
            })
        })
        .collect()
}
