//! Slot aggregation across both regions.

use chrono::Utc;
use futures::future::join_all;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::single_flight::SingleFlight;
use super::upstream::UpstreamClient;
use crate::data_fetcher::cache::{CacheStats, SlotCache};
use crate::data_fetcher::court_names::CourtNameResolver;
use crate::data_fetcher::models::{ClubSummary, Region, Tenant, TimeSlot, sort_slots};
use crate::data_fetcher::processors::{assign_region, build_time_slots, date_string, next_days};

/// A club found by at least one region search, with the regions that returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredTenant {
    pub tenant: Tenant,
    pub returned_by: Vec<Region>,
}

impl DiscoveredTenant {
    /// Region the club is listed under, see [`assign_region`].
    pub fn assigned_region(&self) -> Option<Region> {
        assign_region(self.tenant.coordinate, &self.returned_by)
    }
}

/// Merges per-region tenant lists, keeping the first occurrence of each id.
pub fn merge_tenants(per_region: Vec<(Region, Vec<Tenant>)>) -> Vec<DiscoveredTenant> {
    let mut merged: Vec<DiscoveredTenant> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (region, tenants) in per_region {
        for tenant in tenants {
            match index.get(&tenant.id) {
                Some(&position) => {
                    let entry = &mut merged[position];
                    if !entry.returned_by.contains(&region) {
                        entry.returned_by.push(region);
                    }
                }
                None => {
                    index.insert(tenant.id.clone(), merged.len());
                    merged.push(DiscoveredTenant {
                        tenant,
                        returned_by: vec![region],
                    });
                }
            }
        }
    }

    merged
}

struct Inner {
    upstream: UpstreamClient,
    court_names: Arc<CourtNameResolver>,
    slot_cache: SlotCache,
    flights: SingleFlight<Vec<TimeSlot>>,
}

/// Aggregates bookable slots from every club in Ubud and Sanur.
///
/// Cheap to clone; clones share caches and the in-flight map.
#[derive(Clone)]
pub struct SlotAggregator {
    inner: Arc<Inner>,
}

impl SlotAggregator {
    pub fn new(upstream: UpstreamClient, court_names: Arc<CourtNameResolver>) -> Self {
        Self {
            inner: Arc::new(Inner {
                upstream,
                court_names,
                slot_cache: SlotCache::new(),
                flights: SingleFlight::new(),
            }),
        }
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }

    pub fn court_names(&self) -> &Arc<CourtNameResolver> {
        &self.inner.court_names
    }

    /// All bookable slots for a date, sorted by `(date, time)`.
    ///
    /// Never fails: unreachable regions or clubs contribute no slots.
    /// Concurrent calls for the same date share one computation.
    #[instrument(skip(self))]
    pub async fn fetch_slots_for_date(&self, date: &str) -> Vec<TimeSlot> {
        if let Some(slots) = self.inner.slot_cache.get(date).await {
            debug!("Serving {} cached slots for {date}", slots.len());
            return slots;
        }

        let this = self.clone();
        let owned_date = date.to_string();
        self.inner
            .flights
            .run(date, move || async move { this.aggregate(&owned_date).await })
            .await
    }

    async fn aggregate(&self, date: &str) -> Vec<TimeSlot> {
        let (tenants, mut complete) = self.discover_tenants_checked().await;
        info!("Fetching availability for {} clubs on {date}", tenants.len());

        let per_tenant = join_all(tenants.iter().filter_map(|discovered| {
            let region = discovered.assigned_region()?;
            Some(self.slots_for_tenant(&discovered.tenant, region, date))
        }))
        .await;

        let mut seen = HashSet::new();
        let mut slots = Vec::new();
        for (tenant_slots, tenant_complete) in per_tenant {
            complete &= tenant_complete;
            slots.extend(
                tenant_slots
                    .into_iter()
                    .filter(|slot| seen.insert(slot.id.clone())),
            );
        }
        sort_slots(&mut slots);

        if complete {
            info!("Aggregated {} slots for {date}", slots.len());
            let today = date_string(Utc::now(), 0);
            self.inner
                .slot_cache
                .set(date, &today, slots.clone())
                .await;
        } else {
            // Partial results are served but not memoized
            warn!(
                "Aggregated {} slots for {date} with upstream failures, not caching",
                slots.len()
            );
        }
        slots
    }

    /// Slots of one club, and whether its availability was fetched successfully.
    ///
    /// A failed resource listing only degrades court names, so it does not
    /// count as incomplete.
    async fn slots_for_tenant(
        &self,
        tenant: &Tenant,
        region: Region,
        date: &str,
    ) -> (Vec<TimeSlot>, bool) {
        let upstream = &self.inner.upstream;
        let (availability, resources) = tokio::join!(
            upstream.try_fetch_availability(&tenant.id, date),
            upstream.fetch_resources(&tenant.id),
        );

        let availability = match availability {
            Ok(availability) => availability,
            Err(e) => {
                warn!("No availability for {} on {date}: {e}", tenant.name);
                return (Vec::new(), false);
            }
        };

        if !resources.is_empty() {
            self.inner
                .court_names
                .set_names(
                    &tenant.id,
                    resources.iter().map(|r| (r.id.as_str(), r.name.as_str())),
                )
                .await;
        }

        let names = self
            .inner
            .court_names
            .resolve_many(
                &tenant.id,
                availability.iter().map(|entry| entry.resource_id.as_str()),
            )
            .await;

        (build_time_slots(tenant, region, &availability, &names), true)
    }

    /// Searches both regions concurrently and merges the results.
    pub async fn discover_tenants(&self) -> Vec<DiscoveredTenant> {
        self.discover_tenants_checked().await.0
    }

    /// Like [`discover_tenants`](Self::discover_tenants), also reporting whether
    /// both region searches succeeded.
    async fn discover_tenants_checked(&self) -> (Vec<DiscoveredTenant>, bool) {
        let upstream = &self.inner.upstream;
        let (ubud, sanur) = tokio::join!(
            upstream.try_fetch_tenants(Region::Ubud),
            upstream.try_fetch_tenants(Region::Sanur),
        );

        let mut complete = true;
        let mut per_region = Vec::with_capacity(Region::ALL.len());
        for (region, result) in [(Region::Ubud, ubud), (Region::Sanur, sanur)] {
            match result {
                Ok(tenants) => per_region.push((region, tenants)),
                Err(e) => {
                    warn!("Tenant search for {region} failed: {e}");
                    complete = false;
                    per_region.push((region, Vec::new()));
                }
            }
        }
        (merge_tenants(per_region), complete)
    }

    /// Every known club with the region it is listed under, sorted by name.
    #[instrument(skip(self))]
    pub async fn fetch_all_clubs(&self) -> Vec<ClubSummary> {
        let mut clubs: Vec<ClubSummary> = self
            .discover_tenants()
            .await
            .into_iter()
            .filter_map(|discovered| {
                let location = discovered.assigned_region()?;
                Some(ClubSummary {
                    id: discovered.tenant.id,
                    name: discovered.tenant.name,
                    location,
                })
            })
            .collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        clubs
    }

    /// Prefetches the next `days` Bali dates in the background.
    ///
    /// Runs at most once per Bali day; later calls the same day return no handles.
    pub async fn warm_up(&self, days: u32) -> Vec<JoinHandle<()>> {
        let now = Utc::now();
        let today = date_string(now, 0);
        if days == 0 || !self.inner.slot_cache.needs_warm_up(&today).await {
            return Vec::new();
        }

        next_days(now, days)
            .into_iter()
            .map(|date| {
                let this = self.clone();
                tokio::spawn(async move {
                    let slots = this.fetch_slots_for_date(&date).await;
                    debug!("Warmed {} slots for {date}", slots.len());
                })
            })
            .collect()
    }

    /// Drops memoized slots and forgets the warm-up marker.
    pub async fn clear_slot_cache(&self) {
        self.inner.slot_cache.clear().await;
    }

    pub async fn cache_stats(&self) -> BTreeMap<&'static str, CacheStats> {
        let responses = self.inner.upstream.response_cache();
        BTreeMap::from([
            (responses.name(), responses.stats().await),
            ("slots", self.inner.slot_cache.stats().await),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::Coordinate;

    fn tenant(id: &str, coordinate: Option<Coordinate>) -> Tenant {
        Tenant {
            id: id.to_string(),
            name: format!("Club {id}"),
            slug: None,
            coordinate,
        }
    }

    #[test]
    fn test_merge_tenants_first_occurrence_wins() {
        let mut renamed = tenant("a", None);
        renamed.name = "Renamed".to_string();

        let merged = merge_tenants(vec![
            (Region::Ubud, vec![tenant("a", None), tenant("b", None)]),
            (Region::Sanur, vec![renamed, tenant("c", None)]),
        ]);

        let ids: Vec<_> = merged.iter().map(|d| d.tenant.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged[0].tenant.name, "Club a");
        assert_eq!(merged[0].returned_by, vec![Region::Ubud, Region::Sanur]);
        assert_eq!(merged[2].returned_by, vec![Region::Sanur]);
    }

    #[test]
    fn test_assigned_region() {
        let near_sanur = DiscoveredTenant {
            tenant: tenant("a", Some(Coordinate::new(-8.69, 115.26))),
            returned_by: vec![Region::Ubud, Region::Sanur],
        };
        assert_eq!(near_sanur.assigned_region(), Some(Region::Sanur));

        let unknown = DiscoveredTenant {
            tenant: tenant("b", None),
            returned_by: vec![Region::Sanur, Region::Ubud],
        };
        assert_eq!(unknown.assigned_region(), Some(Region::Sanur));
    }
}
